pub use kurbo::{BezPath, Point, Rect};

/// Horizontal interval `[x0, x1]` in graph pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Left edge.
    pub x0: f64,
    /// Right edge.
    pub x1: f64,
}

impl Span {
    /// Build a span from its left edge and width.
    pub fn from_origin_width(x0: f64, width: f64) -> Self {
        Self { x0, x1: x0 + width }
    }

    /// Build a span from two edges, ordering them so that `x0 <= x1`.
    pub fn ordered(a: f64, b: f64) -> Self {
        if a <= b {
            Self { x0: a, x1: b }
        } else {
            Self { x0: b, x1: a }
        }
    }

    /// Width of the span (never negative for spans built by this crate).
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    /// Whether the span has no horizontal extent.
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0
    }

    /// Whether `x` falls inside the half-open interval `[x0, x1)`.
    pub fn contains(self, x: f64) -> bool {
        self.x0 <= x && x < self.x1
    }

    /// Smallest span covering both `self` and `other`.
    pub fn union(self, other: Span) -> Span {
        Span {
            x0: self.x0.min(other.x0),
            x1: self.x1.max(other.x1),
        }
    }

    /// Rectangle spanning this interval between `y0` and `y1`.
    pub fn to_rect(self, y0: f64, y1: f64) -> Rect {
        Rect::new(self.x0, y0, self.x1, y1)
    }
}
