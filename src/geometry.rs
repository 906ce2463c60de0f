//! Axis-aligned rectangles in world pixels.

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Rectangle of the given size whose bottom edge is centred on `(x, y)`.
    pub fn from_midbottom(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect::new(x - width / 2.0, y - height, width, height)
    }

    /// Rectangle of the given size centred on `(x, y)`.
    pub fn from_center(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect::new(x - width / 2.0, y - height / 2.0, width, height)
    }

    // ── Edges ────────────────────────────────────────────────────────────────

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Copy of this rectangle shifted by `(dx, dy)`.
    pub fn moved(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Strict overlap test: rectangles that only share an edge do not collide,
    /// and empty rectangles never collide.
    pub fn colliderect(&self, other: &Rect) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && other.width > 0.0
            && other.height > 0.0
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
