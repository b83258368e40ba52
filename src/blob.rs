use glam::Vec2;

use crate::canvas::DrawSurface;

/// Largest radius reachable by growing, absorbing can overshoot it
pub const MAX_RADIUS: f32 = 300.0;
/// Default amount added by [`Blob::grow`]
pub const GROWTH_STEP: f32 = 2.0;
/// Default amount removed by [`Blob::shrink`]
pub const DECAY_STEP: f32 = 0.2;
pub const MAX_MASS: f32 = MAX_RADIUS * GROWTH_STEP;
pub const INITIAL_RADIUS: f32 = 1.0;

const RED: u8 = 252;
const BLUE: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobId(pub u64);

impl std::fmt::Display for BlobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_unorm(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

#[derive(Clone, Debug)]
pub struct Blob {
    id: BlobId,
    radius: f32,
    mass: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub activated: bool,
}

impl Blob {
    pub fn new(id: BlobId, position: Vec2) -> Self {
        Self::with_radius(id, position, INITIAL_RADIUS)
    }

    pub fn with_radius(id: BlobId, position: Vec2, radius: f32) -> Self {
        Self {
            id,
            radius,
            mass: radius * 2.0,
            position,
            velocity: Vec2::ZERO,
            activated: false,
        }
    }

    pub fn id(&self) -> BlobId {
        self.id
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Yellow for small blobs, fading to red as the radius nears [`MAX_RADIUS`]
    pub fn color(&self) -> Rgb {
        let green = 255.0 - (self.radius * (255.0 / MAX_RADIUS)).floor();
        Rgb::new(RED, green.clamp(0.0, 255.0) as u8, BLUE)
    }

    /// Grows by `amount`, or by [`GROWTH_STEP`] up to [`MAX_RADIUS`]
    pub fn grow(&mut self, amount: Option<f32>) {
        let amount = match amount {
            Some(amount) => amount,
            None if self.radius >= MAX_RADIUS => return,
            None => GROWTH_STEP.min(MAX_RADIUS - self.radius),
        };

        self.set_radius(self.radius + amount);
    }

    /// Shrinks by `amount`, or by [`DECAY_STEP`], never below zero
    pub fn shrink(&mut self, amount: Option<f32>) {
        let amount = amount.unwrap_or(DECAY_STEP);
        self.set_radius((self.radius - amount).max(0.0));
    }

    fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.mass = radius * 2.0;
    }

    /// Moves by the current velocity, bounces off the surface edges and draws itself.
    ///
    /// Each edge is tested one velocity step ahead, so a blob turns around
    /// before it would cross the edge on the next frame.
    pub fn advance(&mut self, surface: &mut impl DrawSurface) {
        self.position += self.velocity;

        let extent = Vec2::new(surface.width(), surface.height());
        for axis in 0..2 {
            let ahead = self.position[axis] + self.velocity[axis];

            if ahead - self.radius < 0.0 {
                self.velocity[axis] = -self.velocity[axis];
                self.position[axis] = self.radius;
            }
            // Re-read, the low edge may have just flipped the velocity
            let ahead = self.position[axis] + self.velocity[axis];
            if ahead + self.radius > extent[axis] {
                self.velocity[axis] = -self.velocity[axis];
                self.position[axis] = extent[axis] - self.radius;
            }
        }

        surface.fill_circle(self.position, self.radius, self.color());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn blob(radius: f32) -> Blob {
        Blob::with_radius(BlobId(0), Vec2::new(100.0, 100.0), radius)
    }

    #[test]
    fn mass_follows_radius() {
        let mut blob = blob(INITIAL_RADIUS);
        assert_eq!(blob.mass(), 2.0);

        blob.grow(None);
        assert_eq!(blob.radius(), 3.0);
        assert_eq!(blob.mass(), 2.0 * blob.radius());

        blob.grow(Some(7.5));
        assert_eq!(blob.mass(), 2.0 * blob.radius());

        blob.shrink(None);
        assert_eq!(blob.mass(), 2.0 * blob.radius());

        blob.shrink(Some(4.0));
        assert_eq!(blob.mass(), 2.0 * blob.radius());
    }

    #[test]
    fn default_growth_stops_at_max_radius() {
        let mut blob = blob(MAX_RADIUS - 1.0);
        blob.grow(None);
        assert_eq!(blob.radius(), MAX_RADIUS);
        assert_eq!(blob.mass(), 2.0 * MAX_RADIUS);

        blob.grow(None);
        assert_eq!(blob.radius(), MAX_RADIUS);
    }

    #[test]
    fn default_growth_leaves_overshoot_alone() {
        let mut blob = blob(MAX_RADIUS + 10.0);
        blob.grow(None);
        assert_eq!(blob.radius(), MAX_RADIUS + 10.0);
    }

    #[test]
    fn explicit_growth_overshoots_max_radius() {
        let mut blob = blob(MAX_RADIUS);
        blob.grow(Some(25.0));
        assert_eq!(blob.radius(), MAX_RADIUS + 25.0);
        assert_eq!(blob.mass(), 2.0 * (MAX_RADIUS + 25.0));
    }

    #[test]
    fn shrink_never_goes_negative() {
        let mut blob = blob(0.1);
        blob.shrink(None);
        assert_eq!(blob.radius(), 0.0);
        assert_eq!(blob.mass(), 0.0);
    }

    #[test]
    fn green_channel_tracks_radius() {
        assert_eq!(blob(0.0).color(), Rgb::new(252, 255, 3));
        assert_eq!(blob(1.0).color(), Rgb::new(252, 255, 3));
        assert_eq!(blob(150.0).color(), Rgb::new(252, 128, 3));
        assert_eq!(blob(MAX_RADIUS).color(), Rgb::new(252, 0, 3));
        assert_eq!(blob(MAX_RADIUS * 2.0).color(), Rgb::new(252, 0, 3));
    }

    #[test]
    fn bounces_off_left_edge() {
        let mut canvas = Canvas::new(800, 600);
        let mut blob = Blob::with_radius(BlobId(0), Vec2::new(5.0, 300.0), 4.0);
        blob.velocity = Vec2::new(-3.0, 0.0);

        blob.advance(&mut canvas);

        assert_eq!(blob.velocity.x, 3.0);
        assert_eq!(blob.position.x, 4.0);
        assert_eq!(blob.position.y, 300.0);
    }

    #[test]
    fn bounces_off_top_edge() {
        let mut canvas = Canvas::new(800, 600);
        let mut blob = Blob::with_radius(BlobId(0), Vec2::new(300.0, 8.0), 6.0);
        blob.velocity = Vec2::new(0.0, -2.0);

        blob.advance(&mut canvas);

        assert_eq!(blob.velocity, Vec2::new(0.0, 2.0));
        assert_eq!(blob.position, Vec2::new(300.0, 6.0));
    }

    #[test]
    fn bounces_off_far_edges() {
        let mut canvas = Canvas::new(800, 600);
        let mut blob = Blob::with_radius(BlobId(0), Vec2::new(790.0, 590.0), 10.0);
        blob.velocity = Vec2::new(2.0, 1.0);

        blob.advance(&mut canvas);

        assert_eq!(blob.velocity, Vec2::new(-2.0, -1.0));
        assert_eq!(blob.position, Vec2::new(790.0, 590.0));
    }

    #[test]
    fn moves_freely_away_from_edges() {
        let mut canvas = Canvas::new(800, 600);
        let mut blob = blob(10.0);
        blob.velocity = Vec2::new(1.5, -2.5);

        blob.advance(&mut canvas);

        assert_eq!(blob.position, Vec2::new(101.5, 97.5));
        assert_eq!(blob.velocity, Vec2::new(1.5, -2.5));
    }

    #[test]
    fn advance_draws_once() {
        let mut canvas = Canvas::new(800, 600);
        let mut blob = blob(12.0);

        blob.advance(&mut canvas);

        let circles = canvas.circles();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].center, blob.position);
        assert_eq!(circles[0].radius, 12.0);
        assert_eq!(circles[0].color, blob.color().to_unorm());
    }
}
