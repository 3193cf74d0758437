use rand::Rng;

use crate::config::ids::{MAX_ID, MIN_ID};

/// Synthetic clip/track id in the engine's 32-bit id range.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.random_range(MIN_ID..=MAX_ID)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_ids_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let id = random_id(&mut rng);
            assert!((MIN_ID..=MAX_ID).contains(&id));
        }
    }

    #[test]
    fn test_seeded_ids_repeat() {
        let a = random_id(&mut StdRng::seed_from_u64(9));
        let b = random_id(&mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
