//! Horizontal scroll state and world → screen conversion.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Camera {
    offset: i32,
}

impl Camera {
    pub fn new() -> Camera {
        Camera { offset: 0 }
    }

    /// World column shown at screen column 0.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Scroll one column.  Called once per tick, after all painting.
    pub fn advance(&mut self) {
        self.offset += 1;
    }

    /// May be negative or past the screen; callers skip such cells.
    pub fn to_screen_x(&self, world_x: i32) -> i32 {
        world_x - self.offset
    }

    pub fn to_world_x(&self, screen_x: i32) -> i32 {
        screen_x + self.offset
    }
}
