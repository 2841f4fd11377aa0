use stacklist::AnimationSpec;

/// A scroll offset easing towards a target along the list's stacking axis.
///
/// Offsets are signed: with a leading content inset the list can rest above zero. Timing
/// (delay, duration, easing) is the same [`AnimationSpec`] item transitions use.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTween {
    pub from: f32,
    pub to: f32,
    pub start_ms: u64,
    pub spec: AnimationSpec,
}

impl ScrollTween {
    pub fn new(from: f32, to: f32, start_ms: u64, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            start_ms,
            spec,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.spec.is_finished(self.start_ms, now_ms)
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        let t = self.spec.progress(self.start_ms, now_ms);
        self.from + (self.to - self.from) * t
    }

    /// Heads for `to` from wherever the tween is at `now_ms`, within the time it had left.
    pub fn retarget(&mut self, now_ms: u64, to: f32) {
        let from = self.sample(now_ms);
        let begin = self.spec.begin_ms(self.start_ms);
        let end = begin.saturating_add(self.spec.duration_ms);
        let begin = begin.max(now_ms);

        self.from = from;
        self.to = to;
        self.start_ms = now_ms;
        self.spec.delay_ms = begin - now_ms;
        self.spec.duration_ms = end.saturating_sub(begin);
    }

    /// Pulls the target back into `min..=max`, returning whether it moved.
    ///
    /// The scrollable range shrinks when content is removed while the tween runs; the tween
    /// then settles on the nearest reachable offset instead of jumping there at the end.
    pub fn clamp_target(&mut self, now_ms: u64, min: f32, max: f32) -> bool {
        let to = self.to.min(max).max(min);
        if to == self.to {
            return false;
        }
        self.retarget(now_ms, to);
        true
    }
}
