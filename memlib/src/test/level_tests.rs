use std::error::Error;
use crate::config::FULLY_ASSOCIATIVE;
use crate::context::SimContext;
use crate::level::{Level, ProbeOutcome};
use crate::replacement_policies::Policy;
use crate::SimError;

#[test]
fn derives_set_count() -> Result<(), Box<dyn Error>> {
    let l1 = Level::new("L1", 32 * 1024, 64, 4, 1, Policy::Lru)?;
    assert_eq!(l1.num_sets(), 128);
    assert_eq!(l1.associativity(), 4);

    let full = Level::new("Full", 4096, 64, FULLY_ASSOCIATIVE, 1, Policy::Lru)?;
    assert_eq!(full.num_sets(), 1);
    assert_eq!(full.associativity(), 64);

    // Smaller than one set still gets a set
    let tiny = Level::new("Tiny", 128, 64, 8, 1, Policy::Lru)?;
    assert_eq!(tiny.num_sets(), 1);
    assert_eq!(tiny.associativity(), 8);
    Ok(())
}

#[test]
fn rejects_degenerate_geometry() {
    assert!(matches!(Level::new("L1", 64, 0, 1, 1, Policy::Lru), Err(SimError::Configuration(_))));
    assert!(matches!(Level::new("L1", 32, 64, FULLY_ASSOCIATIVE, 1, Policy::Lru), Err(SimError::Configuration(_))));
    assert!(matches!(Level::new("L1", 64, 64, u64::MAX, 1, Policy::Lru), Err(SimError::Configuration(_))));
}

#[test]
fn decomposes_addresses() -> Result<(), Box<dyn Error>> {
    // 4 sets of 64 byte blocks
    let level = Level::new("L", 4 * 2 * 64, 64, 2, 1, Policy::Lru)?;
    assert_eq!(level.num_sets(), 4);
    assert_eq!(level.decompose(0), (0, 0));
    assert_eq!(level.decompose(63), (0, 0));
    assert_eq!(level.decompose(64), (1, 0));
    assert_eq!(level.decompose(3 * 64 + 5), (3, 0));
    assert_eq!(level.decompose(4 * 64), (0, 1));
    assert_eq!(level.decompose(13 * 64), (1, 3));
    Ok(())
}

#[test]
fn probe_of_absent_index_is_not_counted() -> Result<(), Box<dyn Error>> {
    let mut ctx = SimContext::seeded(0);
    let mut level = Level::new("L", 256, 64, 1, 1, Policy::Lru)?;
    assert_eq!(level.probe(0, &mut ctx), ProbeOutcome::Absent);
    assert_eq!((level.hits(), level.misses()), (0, 0));

    level.warm(0, &mut ctx);
    assert_eq!(level.probe(0, &mut ctx), ProbeOutcome::Hit);
    // Same index, different tag
    assert_eq!(level.probe(256, &mut ctx), ProbeOutcome::Miss);
    // Another index, still never populated
    assert_eq!(level.probe(64, &mut ctx), ProbeOutcome::Absent);
    assert_eq!((level.hits(), level.misses()), (1, 1));
    Ok(())
}

#[test]
fn probe_of_absent_index_can_count_as_miss() -> Result<(), Box<dyn Error>> {
    let mut ctx = SimContext::seeded(0);
    let mut level = Level::new("L", 256, 64, 1, 1, Policy::Lru)?.count_absent_as_miss(true);
    assert_eq!(level.probe(0, &mut ctx), ProbeOutcome::Absent);
    assert_eq!((level.hits(), level.misses()), (0, 1));
    Ok(())
}

#[test]
fn warm_creates_sets_lazily_without_counting() -> Result<(), Box<dyn Error>> {
    let mut ctx = SimContext::seeded(0);
    let mut level = Level::new("L", 1024, 64, 2, 1, Policy::Lru)?;
    assert_eq!(level.populated_sets(), 0);
    level.warm(64, &mut ctx);
    level.warm(64 + 8 * 64, &mut ctx);
    assert_eq!(level.populated_sets(), 1);
    let set = level.set(1).ok_or("set 1 should exist")?;
    assert_eq!(set.capacity(), 2);
    assert_eq!(set.policy(), Policy::Lru);
    assert_eq!(level.resident_blocks(), 2);
    assert!(level.contains(64));
    assert_eq!((level.hits(), level.misses()), (0, 0));
    Ok(())
}

#[test]
fn stats_rates() -> Result<(), Box<dyn Error>> {
    let mut ctx = SimContext::seeded(0);
    let mut level = Level::new("L", 64, 64, 1, 1, Policy::Lru)?;
    let empty = level.stats();
    assert_eq!((empty.hit_rate, empty.miss_rate), (0.0, 0.0));

    level.warm(0, &mut ctx);
    level.probe(0, &mut ctx);
    level.probe(0, &mut ctx);
    level.probe(0, &mut ctx);
    level.probe(64, &mut ctx);
    let stats = level.stats();
    assert_eq!((stats.hits, stats.misses), (3, 1));
    assert_eq!(stats.hit_rate, 75.0);
    assert_eq!(stats.miss_rate, 25.0);
    Ok(())
}
