use glam::Vec2;

use crate::blob::Rgb;

/// Something blobs can be drawn onto
pub trait DrawSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
}

/// One filled circle as the render pipeline reads it
#[repr(C)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct CircleInstance {
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 3],
}

/// Collects the circles of one frame, in pixel coordinates
pub struct Canvas {
    size: Vec2,
    circles: Vec<CircleInstance>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Vec2::new(width as f32, height as f32),
            circles: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Vec2::new(width as f32, height as f32);
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Forgets the previous frame
    pub fn clear(&mut self) {
        self.circles.clear();
    }

    pub fn circles(&self) -> &[CircleInstance] {
        &self.circles
    }
}

impl DrawSurface for Canvas {
    fn width(&self) -> f32 {
        self.size.x
    }

    fn height(&self) -> f32 {
        self.size.y
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.circles.push(CircleInstance {
            center,
            radius,
            color: color.to_unorm(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_circles_until_cleared() {
        let mut canvas = Canvas::new(640, 480);
        canvas.fill_circle(Vec2::new(10.0, 20.0), 5.0, Rgb::new(255, 0, 51));

        assert_eq!(canvas.circles().len(), 1);
        assert_eq!(canvas.circles()[0].center, Vec2::new(10.0, 20.0));
        assert_eq!(canvas.circles()[0].color, [1.0, 0.0, 0.2]);

        canvas.clear();
        assert!(canvas.circles().is_empty());
        assert_eq!(canvas.size(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn instance_layout_matches_vertex_stride() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 6 * 4);
    }
}
