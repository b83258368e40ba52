//! The per-frame rules: growing under the pointer, chasing and fleeing,
//! and absorbing on contact.

use glam::Vec2;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    blob::{Blob, BlobId, MAX_MASS, MAX_RADIUS},
    canvas::DrawSurface,
    pointer::Pointer,
    population::Population,
    utils::direction,
};

/// Fraction of the velocity kept from one frame to the next
pub const SMOOTH: f32 = 0.9;
pub const SPEED: f32 = 1.0;
/// Blobs closer than this plus their radius are pushed away from the pointer
pub const POINTER_RADIUS: f32 = 40.0;
const JITTER: f32 = SPEED / 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Merge {
    pub absorber: BlobId,
    pub absorbed: BlobId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub merge: Option<Merge>,
}

pub struct Simulation {
    population: Population,
    pointer: Pointer,
    next_id: u64,
    rng: StdRng,
}

impl Simulation {
    /// `seed` fixes the jitter sequence, `None` seeds from the OS
    pub fn new(pointer_position: Vec2, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            population: Population::new(),
            pointer: Pointer::new(pointer_position),
            next_id: 0,
            rng,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn move_pointer(&mut self, position: Vec2) {
        self.pointer.position = position;
    }

    /// Starts growing a new blob under the pointer.
    ///
    /// Returns `None` when the pointer is already pressed, the blob being
    /// grown has to stay the last one.
    pub fn press(&mut self) -> Option<BlobId> {
        if self.pointer.pressed {
            return None;
        }
        self.pointer.pressed = true;

        let id = BlobId(self.next_id);
        self.next_id += 1;
        self.population.spawn(Blob::new(id, self.pointer.position));
        debug!("Spawned blob {} at {}", id, self.pointer.position);

        Some(id)
    }

    pub fn release(&mut self) {
        self.pointer.pressed = false;
        self.activate_last();
    }

    /// Removes every blob, ids keep counting up
    pub fn clear(&mut self) {
        if self.population.is_empty() {
            return;
        }

        debug!("Cleared {} blobs", self.population.len());
        self.population.clear();
    }

    /// Runs one frame and draws the result onto `surface`
    pub fn step(&mut self, surface: &mut impl DrawSurface) -> StepReport {
        if self.pointer.pressed {
            let position = self.pointer.position;
            if let Some(held) = self.population.last_mut() {
                held.position = position;
                held.grow(None);
            }
        } else {
            self.activate_last();
        }

        let merge = self.interact();
        if let Some(merge) = merge {
            self.absorb(merge);
        }

        for blob in self.population.iter_mut() {
            blob.advance(surface);
        }

        StepReport { merge }
    }

    /// Draws every blob where it stands
    pub fn paint(&self, surface: &mut impl DrawSurface) {
        for blob in self.population.iter() {
            surface.fill_circle(blob.position, blob.radius(), blob.color());
        }
    }

    fn activate_last(&mut self) {
        if let Some(last) = self.population.last_mut() {
            if !last.activated {
                last.activated = true;
                debug!("Activated blob {}", last.id());
            }
        }
    }

    /// Applies pointer, decay and pairwise forces in spawn order.
    ///
    /// Stops at the first contact between two activated blobs and returns it,
    /// the absorber's velocity is left untouched for this frame.
    fn interact(&mut self) -> Option<Merge> {
        let blobs = self.population.as_mut_slice();

        for i in 0..blobs.len() {
            let cur = &mut blobs[i];
            if !cur.activated {
                continue;
            }

            let away = cur.position - self.pointer.position;
            if away.length() < POINTER_RADIUS + cur.radius() {
                cur.velocity += direction(away);
            }

            if cur.radius() >= MAX_RADIUS / 2.0 {
                cur.shrink(None);
            }

            let cur = &blobs[i];
            let mut acceleration = Vec2::ZERO;
            for (j, other) in blobs.iter().enumerate() {
                if i == j {
                    acceleration += Vec2::new(
                        self.rng.gen_range(-1.0..=1.0),
                        self.rng.gen_range(-1.0..=1.0),
                    ) * JITTER;
                    continue;
                }

                acceleration += attraction(cur, other);

                if other.activated && cur.position.distance(other.position) <= cur.radius() {
                    return Some(Merge {
                        absorber: cur.id(),
                        absorbed: other.id(),
                    });
                }
            }

            let cur = &mut blobs[i];
            cur.velocity = cur.velocity * SMOOTH + acceleration;
        }

        None
    }

    fn absorb(&mut self, merge: Merge) {
        let Some(absorbed) = self.population.remove(merge.absorbed) else {
            debug!("Blob {} was already gone", merge.absorbed);
            return;
        };

        if let Some(absorber) = self.population.get_mut(merge.absorber) {
            absorber.grow(Some(absorbed.radius()));
            debug!(
                "Blob {} absorbed {}, radius now {:.1}",
                merge.absorber,
                merge.absorbed,
                absorber.radius()
            );
        }
    }
}

/// Per-axis pull `cur` feels from `other`, reversed when `other` is larger
pub fn attraction(cur: &Blob, other: &Blob) -> Vec2 {
    let force = cur.mass() * SPEED / MAX_MASS;
    let toward = direction(other.position - cur.position) * force;

    if other.radius() > cur.radius() {
        -toward
    } else {
        toward
    }
}
