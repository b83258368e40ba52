use crate::blob::{Blob, BlobId};

/// Live blobs in spawn order
///
/// The last blob is the one a held press is growing.
#[derive(Default)]
pub struct Population {
    blobs: Vec<Blob>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Blob> {
        self.blobs.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Blob> {
        self.blobs.iter_mut()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Blob] {
        &mut self.blobs
    }

    pub fn get(&self, id: BlobId) -> Option<&Blob> {
        self.blobs.iter().find(|blob| blob.id() == id)
    }

    pub fn get_mut(&mut self, id: BlobId) -> Option<&mut Blob> {
        self.blobs.iter_mut().find(|blob| blob.id() == id)
    }

    pub fn last_mut(&mut self) -> Option<&mut Blob> {
        self.blobs.last_mut()
    }

    pub fn spawn(&mut self, blob: Blob) {
        debug_assert!(
            self.get(blob.id()).is_none(),
            "blob {} spawned twice",
            blob.id()
        );
        self.blobs.push(blob);
    }

    /// Removes the blob with `id`, doing nothing if it is already gone
    pub fn remove(&mut self, id: BlobId) -> Option<Blob> {
        let index = self.blobs.iter().position(|blob| blob.id() == id)?;
        Some(self.blobs.remove(index))
    }

    pub fn clear(&mut self) {
        self.blobs.clear();
    }

    pub fn largest_radius(&self) -> Option<f32> {
        self.blobs.iter().map(Blob::radius).reduce(f32::max)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn population(ids: &[u64]) -> Population {
        let mut population = Population::new();
        for &id in ids {
            population.spawn(Blob::new(BlobId(id), Vec2::ZERO));
        }
        population
    }

    #[test]
    fn keeps_spawn_order() {
        let population = population(&[3, 1, 2]);
        let ids: Vec<_> = population.iter().map(|blob| blob.id().0).collect();
        assert_eq!(ids, [3, 1, 2]);
    }

    #[test]
    fn removes_by_identity() {
        let mut population = population(&[0, 1, 2]);

        let removed = population.remove(BlobId(1));
        assert_eq!(removed.map(|blob| blob.id()), Some(BlobId(1)));

        let ids: Vec<_> = population.iter().map(|blob| blob.id().0).collect();
        assert_eq!(ids, [0, 2]);
    }

    #[test]
    fn removing_absent_blob_is_a_no_op() {
        let mut population = population(&[0, 1]);

        assert!(population.remove(BlobId(7)).is_none());
        assert!(population.remove(BlobId(1)).is_some());
        assert!(population.remove(BlobId(1)).is_none());
        assert_eq!(population.len(), 1);
    }

    #[test]
    fn largest_radius_of_empty_population() {
        let mut population = Population::new();
        assert!(population.is_empty());
        assert_eq!(population.largest_radius(), None);

        population.spawn(Blob::with_radius(BlobId(0), Vec2::ZERO, 4.0));
        population.spawn(Blob::with_radius(BlobId(1), Vec2::ZERO, 9.0));
        assert!(!population.is_empty());
        assert_eq!(population.largest_radius(), Some(9.0));
    }
}
