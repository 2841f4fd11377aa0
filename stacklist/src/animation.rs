//! Transition hooks and the small tween timeline behind them.
//!
//! Edits never wait for animations. An [`Animator`] receives a [`Stage`] (the list's visual
//! model), changes model values inside [`Stage::animate`], and the list records a tween from
//! the value on screen to the new model value. The host drives time with
//! `StackList::tick(now_ms)` and reads in-flight values with `StackList::presentation`.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use crate::types::{lerp, lerp_rect};
use crate::{Axis, ItemId, Rect, Size, Transform, Visual};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}

/// Timing of one animation block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            easing: Easing::EaseInOutCubic,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0 && self.delay_ms == 0
    }

    /// When an animation started at `start_ms` leaves its delay behind.
    pub fn begin_ms(&self, start_ms: u64) -> u64 {
        start_ms.saturating_add(self.delay_ms)
    }

    /// Whether an animation started at `start_ms` has run its full duration by `now_ms`.
    pub fn is_finished(&self, start_ms: u64, now_ms: u64) -> bool {
        let begin = self.begin_ms(start_ms);
        now_ms >= begin && now_ms - begin >= self.duration_ms.max(1)
    }

    /// Eased progress in `0.0..=1.0`. Zero while the delay is still running.
    pub fn progress(&self, start_ms: u64, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.begin_ms(start_ms));
        let t = (elapsed as f32 / self.duration_ms.max(1) as f32).clamp(0.0, 1.0);
        self.easing.sample(t)
    }
}

#[derive(Debug, Default)]
struct SignalState {
    fired: bool,
    waker: Option<Waker>,
}

/// One-shot completion handed to a hook. Calling [`Completion::complete`] lets the list
/// finalize the edit (detach removed items) and resolves the matching [`Transition`].
///
/// Dropping a completion without completing it leaves removed items in the view tree.
#[derive(Debug)]
pub struct Completion {
    signal: Rc<RefCell<SignalState>>,
}

impl Completion {
    /// Creates a completion and the transition it resolves.
    pub fn pair() -> (Completion, Transition) {
        let signal = Rc::new(RefCell::new(SignalState::default()));
        (
            Completion {
                signal: Rc::clone(&signal),
            },
            Transition { signal },
        )
    }

    pub fn complete(self) {
        let waker = {
            let mut state = self.signal.borrow_mut();
            state.fired = true;
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// Resolves once the visual transition of an edit has completed.
///
/// Edits are not queued behind running transitions. Callers that need edits to play one
/// after another should await the previous edit's transition first.
#[derive(Clone, Debug)]
pub struct Transition {
    signal: Rc<RefCell<SignalState>>,
}

impl Transition {
    /// A transition that has already completed.
    pub fn ready() -> Self {
        let (completion, transition) = Completion::pair();
        completion.complete();
        transition
    }

    pub fn is_complete(&self) -> bool {
        self.signal.borrow().fired
    }
}

impl Future for Transition {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.signal.borrow_mut();
        if state.fired {
            return Poll::Ready(());
        }
        state.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Property {
    Frame(Rect, Rect),
    Alpha(f32, f32),
    Transform(Transform, Transform),
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Tween {
    pub(crate) item: ItemId,
    property: Property,
    start_ms: u64,
    spec: AnimationSpec,
    group: Option<u64>,
}

impl Tween {
    pub(crate) fn new(item: ItemId, property: Property, now_ms: u64, spec: AnimationSpec) -> Self {
        Self {
            item,
            property,
            start_ms: now_ms,
            spec,
            group: None,
        }
    }

    fn is_done(&self, now_ms: u64) -> bool {
        self.spec.is_finished(self.start_ms, now_ms)
    }

    fn apply(&self, visual: &mut Visual, now_ms: u64) {
        if now_ms < self.spec.begin_ms(self.start_ms) {
            return;
        }
        let t = self.spec.progress(self.start_ms, now_ms);
        match self.property {
            Property::Frame(from, to) => visual.frame = lerp_rect(from, to, t),
            Property::Alpha(from, to) => visual.alpha = lerp(from, to, t),
            Property::Transform(from, to) => visual.transform = from.lerp(to, t),
        }
    }
}

/// Running tweens plus the completions waiting on them.
#[derive(Debug, Default)]
pub(crate) struct Timeline {
    tweens: Vec<Tween>,
    groups: Vec<(u64, Completion)>,
    next_group: u64,
}

impl Timeline {
    pub(crate) fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub(crate) fn push(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    /// Registers `completion` to fire once every tween pushed through `push_grouped` with the
    /// returned group id has finished.
    pub(crate) fn open_group(&mut self, completion: Completion) -> u64 {
        let id = self.next_group;
        self.next_group = self.next_group.wrapping_add(1);
        self.groups.push((id, completion));
        id
    }

    pub(crate) fn push_grouped(&mut self, mut tween: Tween, group: u64) {
        tween.group = Some(group);
        self.tweens.push(tween);
    }

    /// Samples the on-screen value of `item`, starting from its model value.
    pub(crate) fn present(&self, item: ItemId, model: Visual, now_ms: u64) -> Visual {
        let mut visual = model;
        for tween in self.tweens.iter().filter(|t| t.item == item) {
            tween.apply(&mut visual, now_ms);
        }
        visual
    }

    /// Retires finished tweens and fires completions whose tweens are all gone.
    pub(crate) fn advance(&mut self, now_ms: u64) {
        self.tweens.retain(|t| !t.is_done(now_ms));
        self.settle();
    }

    /// Drops every tween of `item` (it left the view tree).
    pub(crate) fn forget(&mut self, item: ItemId) {
        self.tweens.retain(|t| t.item != item);
        self.settle();
    }

    pub(crate) fn settle(&mut self) {
        let mut i = 0;
        while i < self.groups.len() {
            let id = self.groups[i].0;
            if self.tweens.iter().any(|t| t.group == Some(id)) {
                i += 1;
                continue;
            }
            let (_, completion) = self.groups.remove(i);
            completion.complete();
        }
    }
}

/// The visual model an [`Animator`] works against.
///
/// Setters change *model* values. Inside [`Stage::animate`] those changes are recorded as
/// tweens from the value currently on screen; outside it they apply immediately.
pub trait Stage {
    fn axis(&self) -> Axis;

    /// Size of the visible area of the list.
    fn bounds(&self) -> Size;

    fn now_ms(&self) -> u64;

    fn frame(&self, item: ItemId) -> Option<Rect>;

    fn set_frame(&mut self, item: ItemId, frame: Rect);

    fn alpha(&self, item: ItemId) -> Option<f32>;

    fn set_alpha(&mut self, item: ItemId, alpha: f32);

    fn transform(&self, item: ItemId) -> Option<Transform>;

    fn set_transform(&mut self, item: ItemId, transform: Transform);

    fn bring_to_front(&mut self, item: ItemId);

    fn send_to_back(&mut self, item: ItemId);

    /// Places every constrained item along the chain if anything changed since the last pass.
    fn layout_if_needed(&mut self);

    /// Runs `changes` and animates every frame/alpha/transform they modify.
    ///
    /// `completion` fires when all recorded tweens have finished; immediately when `spec` is
    /// instant or nothing changed.
    fn animate(
        &mut self,
        spec: AnimationSpec,
        changes: &mut dyn FnMut(&mut dyn Stage),
        completion: Option<Completion>,
    );

    /// Animates one item's frame between two explicit rects, independent of its current value.
    ///
    /// Tweens run in the order they were added; a later tween overrides an earlier one once it
    /// has begun, which is enough to express keyframes.
    fn animate_frame(&mut self, item: ItemId, from: Rect, to: Rect, spec: AnimationSpec);
}

/// Pluggable transition hook invoked by the edit operations.
///
/// Every method has a default that plays the [`Fade`] preset.
pub trait Animator {
    fn on_replace(
        &self,
        stage: &mut dyn Stage,
        removed: &[ItemId],
        inserted: &[ItemId],
        completion: Completion,
    ) {
        Fade::default().on_replace(stage, removed, inserted, completion);
    }

    fn on_remove(&self, stage: &mut dyn Stage, removed: &[ItemId], completion: Completion) {
        Fade::default().on_remove(stage, removed, completion);
    }

    fn on_insert(&self, stage: &mut dyn Stage, inserted: &[ItemId]) {
        Fade::default().on_insert(stage, inserted);
    }

    fn on_move(&self, stage: &mut dyn Stage, item: ItemId, from: Rect, to: Rect) {
        Fade::default().on_move(stage, item, from, to);
    }
}

/// Cross-fade for inserts/replaces, shrink-and-fade for removals, bring-to-front for moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fade {
    pub duration_ms: u64,
    pub move_duration_ms: u64,
    pub easing: Easing,
}

impl Default for Fade {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            move_duration_ms: 600,
            easing: Easing::EaseInOutCubic,
        }
    }
}

impl Fade {
    pub fn with_duration(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    fn spec(&self) -> AnimationSpec {
        AnimationSpec::new(self.duration_ms).with_easing(self.easing)
    }
}

impl Animator for Fade {
    fn on_replace(
        &self,
        stage: &mut dyn Stage,
        removed: &[ItemId],
        inserted: &[ItemId],
        completion: Completion,
    ) {
        for &id in inserted {
            stage.set_alpha(id, 0.0);
        }
        stage.animate(
            self.spec(),
            &mut |s| {
                s.layout_if_needed();
                for &id in removed {
                    s.set_alpha(id, 0.0);
                }
                for &id in inserted {
                    s.set_alpha(id, 1.0);
                }
            },
            Some(completion),
        );
    }

    fn on_remove(&self, stage: &mut dyn Stage, removed: &[ItemId], completion: Completion) {
        for &id in removed {
            stage.send_to_back(id);
        }
        stage.animate(
            self.spec(),
            &mut |s| {
                s.layout_if_needed();
                let axis = s.axis();
                for &id in removed {
                    let extent = s.frame(id).map_or(0.0, |f| axis.extent(f));
                    let collapse = match axis {
                        Axis::Vertical => (1.0, 0.01),
                        Axis::Horizontal => (0.01, 1.0),
                    };
                    s.set_transform(
                        id,
                        axis.translation(-extent / 2.0)
                            .scaled_by(collapse.0, collapse.1),
                    );
                    s.set_alpha(id, 0.0);
                }
            },
            Some(completion),
        );
    }

    fn on_insert(&self, stage: &mut dyn Stage, inserted: &[ItemId]) {
        for &id in inserted {
            stage.set_alpha(id, 0.0);
        }
        stage.animate(
            self.spec(),
            &mut |s| {
                s.layout_if_needed();
                for &id in inserted {
                    s.set_alpha(id, 1.0);
                }
            },
            None,
        );
    }

    fn on_move(&self, stage: &mut dyn Stage, item: ItemId, _from: Rect, _to: Rect) {
        stage.bring_to_front(item);
        stage.animate(
            AnimationSpec::new(self.move_duration_ms).with_easing(self.easing),
            &mut |s| s.layout_if_needed(),
            None,
        );
    }
}

/// Items slide in from the leading cross edge (the left of a vertical list) and leave
/// towards the trailing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideFromLeading {
    pub duration_ms: u64,
    pub move_duration_ms: u64,
}

impl Default for SlideFromLeading {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            move_duration_ms: 600,
        }
    }
}

fn cross_extent(stage: &dyn Stage, id: ItemId) -> f32 {
    let axis = stage.axis();
    stage.frame(id).map_or(0.0, |f| axis.cross(f.size))
}

impl Animator for SlideFromLeading {
    fn on_replace(
        &self,
        stage: &mut dyn Stage,
        removed: &[ItemId],
        inserted: &[ItemId],
        completion: Completion,
    ) {
        let axis = stage.axis();
        for &id in inserted {
            let width = cross_extent(stage, id).max(stage_cross(stage));
            stage.set_transform(id, axis.cross_translation(-width));
        }
        stage.animate(
            AnimationSpec::new(self.duration_ms),
            &mut |s| {
                s.layout_if_needed();
                for &id in removed {
                    let width = cross_extent(s, id);
                    s.set_transform(id, axis.cross_translation(width));
                }
                for &id in inserted {
                    s.set_transform(id, Transform::IDENTITY);
                }
            },
            Some(completion),
        );
    }

    fn on_remove(&self, stage: &mut dyn Stage, removed: &[ItemId], completion: Completion) {
        let axis = stage.axis();
        stage.animate(
            AnimationSpec::new(self.duration_ms),
            &mut |s| {
                s.layout_if_needed();
                for &id in removed {
                    let width = cross_extent(s, id);
                    s.set_transform(id, axis.cross_translation(width));
                    s.set_alpha(id, 0.0);
                }
            },
            Some(completion),
        );
    }

    fn on_insert(&self, stage: &mut dyn Stage, inserted: &[ItemId]) {
        let axis = stage.axis();
        for &id in inserted {
            let width = cross_extent(stage, id).max(stage_cross(stage));
            stage.set_transform(id, axis.cross_translation(-width));
        }
        stage.animate(
            AnimationSpec::new(self.duration_ms),
            &mut |s| {
                s.layout_if_needed();
                for &id in inserted {
                    s.set_transform(id, Transform::IDENTITY);
                }
            },
            None,
        );
    }

    fn on_move(&self, stage: &mut dyn Stage, item: ItemId, from: Rect, to: Rect) {
        let axis = stage.axis();
        let half = self.move_duration_ms / 2;
        stage.animate(
            AnimationSpec::new(self.move_duration_ms),
            &mut |s| {
                s.layout_if_needed();
                s.set_frame(item, from);
            },
            None,
        );
        // Out towards the leading edge, jump to the target row, back in.
        let out = axis.offset_cross(from, -axis.cross(from.size));
        let back = axis.offset_cross(to, -axis.cross(to.size));
        stage.animate_frame(item, from, out, AnimationSpec::new(half));
        stage.animate_frame(item, back, to, AnimationSpec::new(half).with_delay(half));
    }
}

fn stage_cross(stage: &dyn Stage) -> f32 {
    stage.axis().cross(stage.bounds())
}
