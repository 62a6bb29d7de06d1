//! End-to-end assembly: a seeded population stepped with one enormous delta
//! lands exactly on the tree.

use evergreen_common::{step_foliage, step_ornaments, FoliagePopulation, OrnamentClass,
    OrnamentPopulation, TreeStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_assembles_fully_after_large_stall() {
    let style = TreeStyle::default();
    let mut rng = StdRng::seed_from_u64(0xE9E4);

    let mut foliage = FoliagePopulation::generate(&mut rng, 100, &style);
    step_foliage(&mut foliage, true, 1000.0, &style);
    for (current, target) in foliage.current().iter().zip(foliage.target()) {
        assert!(current.distance(*target) < 1e-4);
        assert!(current.is_finite());
    }

    for class in OrnamentClass::ALL {
        let mut ornaments = OrnamentPopulation::generate(&mut rng, class, &style);
        step_ornaments(&mut ornaments, true, 1000.0, &style);
        for (current, target) in ornaments.current().iter().zip(ornaments.target()) {
            assert!(current.distance(*target) < 1e-4, "{class:?} did not settle");
            assert!(current.is_finite());
        }
    }
}
