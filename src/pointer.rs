use glam::Vec2;

/// Where the cursor is and whether the primary button is held
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub pressed: bool,
}

impl Pointer {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            pressed: false,
        }
    }
}
