/// Rounds `value` up to the next multiple of `multiple`
pub fn multiple_of(mut value: u32, multiple: u32) -> u32 {
    let remainder = value % multiple;
    if remainder != 0 {
        value += multiple - remainder;
    }

    value
}

/// Per-axis direction of `v`, where a zero component stays zero
///
/// `f32::signum` maps `0.0` to `1.0`, which would turn two blobs sharing a
/// column into a sideways push.
pub fn direction(v: glam::Vec2) -> glam::Vec2 {
    glam::Vec2::new(sign(v.x), sign(v.y))
}

fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn multiple_of_rounds_up() {
        assert_eq!(multiple_of(0, 64), 0);
        assert_eq!(multiple_of(1, 64), 64);
        assert_eq!(multiple_of(64, 64), 64);
        assert_eq!(multiple_of(65, 64), 128);
    }

    #[test]
    fn direction_keeps_zero_axes() {
        assert_eq!(direction(Vec2::new(3.5, -0.1)), Vec2::new(1.0, -1.0));
        assert_eq!(direction(Vec2::new(0.0, -7.0)), Vec2::new(0.0, -1.0));
        assert_eq!(direction(Vec2::ZERO), Vec2::ZERO);
    }
}
