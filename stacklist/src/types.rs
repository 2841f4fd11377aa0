#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn offset_by(&self, dx: f32, dy: f32) -> Self {
        Self {
            origin: Point {
                x: self.origin.x + dx,
                y: self.origin.y + dy,
            },
            size: self.size,
        }
    }

    /// Shrinks the rect by `insets` on every side. Sizes never go negative.
    pub fn inset_by(&self, insets: EdgeInsets) -> Self {
        Self {
            origin: Point {
                x: self.origin.x + insets.left,
                y: self.origin.y + insets.top,
            },
            size: Size {
                width: (self.size.width - insets.left - insets.right).max(0.0),
                height: (self.size.height - insets.top - insets.bottom).max(0.0),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// An affine transform restricted to translation and scale, applied around the item's origin.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub tx: f32,
    pub ty: f32,
    pub sx: f32,
    pub sy: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        sx: 1.0,
        sy: 1.0,
    };

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    pub fn scaled_by(self, sx: f32, sy: f32) -> Self {
        Self {
            sx: self.sx * sx,
            sy: self.sy * sy,
            ..self
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub(crate) fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            tx: lerp(self.tx, to.tx, t),
            ty: lerp(self.ty, to.ty, t),
            sx: lerp(self.sx, to.sx, t),
            sy: lerp(self.sy, to.sy, t),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The axis items are stacked along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// Extent along the stacking axis.
    pub fn main(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Extent across the stacking axis.
    pub fn cross(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    pub fn main_of(self, point: Point) -> f32 {
        match self {
            Self::Vertical => point.y,
            Self::Horizontal => point.x,
        }
    }

    pub fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Self::Vertical => Point { x: cross, y: main },
            Self::Horizontal => Point { x: main, y: cross },
        }
    }

    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Self::Vertical => Size {
                width: cross,
                height: main,
            },
            Self::Horizontal => Size {
                width: main,
                height: cross,
            },
        }
    }

    pub fn rect(self, main_start: f32, main_extent: f32, cross_start: f32, cross_extent: f32) -> Rect {
        Rect {
            origin: self.point(main_start, cross_start),
            size: self.size(main_extent, cross_extent),
        }
    }

    pub fn start(self, rect: Rect) -> f32 {
        self.main_of(rect.origin)
    }

    pub fn end(self, rect: Rect) -> f32 {
        self.start(rect) + self.main(rect.size)
    }

    pub fn extent(self, rect: Rect) -> f32 {
        self.main(rect.size)
    }

    /// Moves `rect` by `delta` along this axis.
    pub fn offset(self, rect: Rect, delta: f32) -> Rect {
        match self {
            Self::Vertical => rect.offset_by(0.0, delta),
            Self::Horizontal => rect.offset_by(delta, 0.0),
        }
    }

    /// Moves `rect` by `delta` across this axis.
    pub fn offset_cross(self, rect: Rect, delta: f32) -> Rect {
        match self {
            Self::Vertical => rect.offset_by(delta, 0.0),
            Self::Horizontal => rect.offset_by(0.0, delta),
        }
    }

    /// `(leading, trailing)` insets along this axis.
    pub fn main_insets(self, insets: EdgeInsets) -> (f32, f32) {
        match self {
            Self::Vertical => (insets.top, insets.bottom),
            Self::Horizontal => (insets.left, insets.right),
        }
    }

    /// `(leading, trailing)` insets across this axis.
    pub fn cross_insets(self, insets: EdgeInsets) -> (f32, f32) {
        match self {
            Self::Vertical => (insets.left, insets.right),
            Self::Horizontal => (insets.top, insets.bottom),
        }
    }

    /// A translation along this axis.
    pub fn translation(self, delta: f32) -> Transform {
        match self {
            Self::Vertical => Transform::translation(0.0, delta),
            Self::Horizontal => Transform::translation(delta, 0.0),
        }
    }

    /// A translation across this axis.
    pub fn cross_translation(self, delta: f32) -> Transform {
        match self {
            Self::Vertical => Transform::translation(delta, 0.0),
            Self::Horizontal => Transform::translation(0.0, delta),
        }
    }
}

/// A geometric edge a link or binding attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// The visual model of a single item: where it sits, how opaque it is, and its transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visual {
    pub frame: Rect,
    pub alpha: f32,
    pub transform: Transform,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            alpha: 1.0,
            transform: Transform::IDENTITY,
        }
    }
}

pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

pub(crate) fn lerp_rect(from: Rect, to: Rect, t: f32) -> Rect {
    Rect::new(
        lerp(from.origin.x, to.origin.x, t),
        lerp(from.origin.y, to.origin.y, t),
        lerp(from.size.width, to.size.width, t),
        lerp(from.size.height, to.size.height, t),
    )
}
