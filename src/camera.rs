use crate::geometry::Rect;

/// Viewport that keeps the player centred. No smoothing: the offset is
/// recomputed from scratch every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub offset: (f32, f32),
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Camera {
            offset: (0.0, 0.0),
            width,
            height,
        }
    }

    pub fn update(&mut self, target: &Rect) {
        self.offset = (
            target.center_x() - self.width / 2.0,
            target.center_y() - self.height / 2.0,
        );
    }

    /// World-space rect → screen-space rect.
    pub fn apply(&self, rect: &Rect) -> Rect {
        rect.moved(-self.offset.0, -self.offset.1)
    }
}
