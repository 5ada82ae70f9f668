//! Flat xyz coordinate buffer.

use crate::error::ShapeError;

/// An ordered set of `N` points stored as `3·N` floats.
///
/// Particle `i` occupies slots `[3i, 3i+1, 3i+2]`.  The length is fixed at
/// construction; nothing in this crate resizes a cloud after it exists.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    coords: Vec<f32>,
}

impl PointCloud {
    /// `count` points, all at the origin.
    pub fn zeros(count: usize) -> Self {
        PointCloud { coords: vec![0.0; count * 3] }
    }

    /// Wrap an existing flat buffer.
    pub fn from_flat(coords: Vec<f32>) -> Result<Self, ShapeError> {
        if coords.len() % 3 != 0 {
            return Err(ShapeError::NotTriplets(coords.len()));
        }
        Ok(PointCloud { coords })
    }

    /// Number of points (not floats).
    pub fn len(&self) -> usize { self.coords.len() / 3 }

    pub fn is_empty(&self) -> bool { self.coords.is_empty() }

    pub fn point(&self, i: usize) -> [f32; 3] {
        let k = i * 3;
        [self.coords[k], self.coords[k + 1], self.coords[k + 2]]
    }

    pub fn set_point(&mut self, i: usize, p: [f32; 3]) {
        let k = i * 3;
        self.coords[k..k + 3].copy_from_slice(&p);
    }

    pub fn as_slice(&self) -> &[f32] { &self.coords }

    pub fn as_mut_slice(&mut self) -> &mut [f32] { &mut self.coords }

    pub fn iter(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.coords.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Largest distance of any point from the origin.
    pub fn bounding_radius(&self) -> f32 {
        self.iter().map(norm).fold(0.0, f32::max)
    }

    /// Mean position, or the origin for an empty cloud.
    pub fn centroid(&self) -> [f32; 3] {
        if self.is_empty() {
            return [0.0; 3];
        }
        let mut sum = [0.0f64; 3];
        for p in self.iter() {
            for c in 0..3 { sum[c] += p[c] as f64; }
        }
        let n = self.len() as f64;
        [(sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32]
    }
}

/// Euclidean length of a 3-vector.
pub fn norm(p: [f32; 3]) -> f32 {
    (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_three_slots_per_point() {
        let c = PointCloud::zeros(4);
        assert_eq!(c.len(), 4);
        assert_eq!(c.as_slice().len(), 12);
        assert!(c.iter().all(|p| p == [0.0; 3]));
    }

    #[test]
    fn from_flat_rejects_ragged() {
        assert_eq!(PointCloud::from_flat(vec![0.0; 7]), Err(ShapeError::NotTriplets(7)));
        assert!(PointCloud::from_flat(vec![0.0; 9]).is_ok());
    }

    #[test]
    fn set_and_get_point() {
        let mut c = PointCloud::zeros(3);
        c.set_point(1, [1.0, 2.0, 3.0]);
        assert_eq!(c.point(1), [1.0, 2.0, 3.0]);
        assert_eq!(&c.as_slice()[3..6], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn bounding_radius_and_centroid() {
        let c = PointCloud::from_flat(vec![3.0, 4.0, 0.0, -3.0, -4.0, 0.0]).unwrap();
        assert_eq!(c.bounding_radius(), 5.0);
        assert_eq!(c.centroid(), [0.0, 0.0, 0.0]);
    }
}
