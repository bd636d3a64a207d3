// tests/property/size_policy_test.rs

//! Item sizing invariants across feed sizes and seeds.

use poserspace::core::interpreter::text::{self, MIN_ITEM_SIZE, size_bounds, size_ceiling};
use poserspace::core::Canvas;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

proptest! {
    #[test]
    fn test_ceiling_is_positive_and_bounded(live in 0usize..100_000, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let ceiling = size_ceiling(live, &mut rng);
        prop_assert!((1..=28).contains(&ceiling));
    }

    #[test]
    fn test_spawned_item_within_bounds(
        live in 0usize..5_000,
        seed in any::<u64>(),
        width in 1u32..4096,
        height in 0u32..4096,
        word in "[a-z]{1,10}",
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let canvas = Canvas { width, height };
        let item = text::spawn_item(&word, live, canvas, &mut rng);

        prop_assert!(size_bounds(live).contains(&item.size));
        prop_assert!(item.size >= MIN_ITEM_SIZE);
        prop_assert_eq!(item.x, width as f32);
        prop_assert!(item.y >= 0.0);
        prop_assert!(height == 0 || item.y < height as f32);
        prop_assert_eq!(item.width, 2.0 * width as f32);
        prop_assert!(!item.measured);
    }
}
