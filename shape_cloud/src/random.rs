//! Uniform random source used by the shape recipes.

use rand::{Rng, RngCore};

/// Anything that can produce a uniform `f32` in `[0, 1)`.
///
/// Every `rand` generator implements this, so `rand::thread_rng()` works in
/// production and `StdRng::seed_from_u64` gives reproducible tests.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn unit_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10_000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u), "out of range: {}", u);
        }
    }

    #[test]
    fn works_through_trait_object() {
        let mut rng = StdRng::seed_from_u64(3);
        let src: &mut dyn RandomSource = &mut rng;
        assert!(src.next_unit() < 1.0);
    }
}
