use std::error::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::block::Block;
use crate::replacement_policies::{
    FirstInFirstOut, LeastFrequentlyUsed, LeastRecentlyUsed, MostRecentlyUsed, Policy, RandomReplacement, ReplacementPolicy,
};

fn block(tag: u64, inserted: u64, last: u64, count: u64) -> Block {
    let mut b = Block::new(tag, inserted);
    b.last_access = last;
    b.access_count = count;
    b
}

fn sample() -> Vec<Block> {
    vec![
        block(0, 1, 9, 3),
        block(1, 2, 4, 1),
        block(2, 3, 12, 5),
        block(3, 4, 5, 1),
    ]
}

#[test]
fn each_policy_picks_its_extremal_block() {
    let blocks = sample();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(LeastRecentlyUsed.select_victim(&blocks, &mut rng), 1);
    assert_eq!(MostRecentlyUsed.select_victim(&blocks, &mut rng), 2);
    assert_eq!(LeastFrequentlyUsed.select_victim(&blocks, &mut rng), 1);
    assert_eq!(FirstInFirstOut.select_victim(&blocks, &mut rng), 0);
}

#[test]
fn enum_dispatch_matches_policies() {
    let blocks = sample();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(Policy::Lru.select_victim(&blocks, &mut rng), 1);
    assert_eq!(Policy::Mru.select_victim(&blocks, &mut rng), 2);
    assert_eq!(Policy::Lfu.select_victim(&blocks, &mut rng), 1);
    assert_eq!(Policy::Fifo.select_victim(&blocks, &mut rng), 0);
}

#[test]
fn ties_keep_first_block() {
    let blocks = vec![block(0, 1, 7, 2), block(1, 2, 7, 2), block(2, 3, 7, 2)];
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(MostRecentlyUsed.select_victim(&blocks, &mut rng), 0);
    assert_eq!(LeastRecentlyUsed.select_victim(&blocks, &mut rng), 0);
    assert_eq!(LeastFrequentlyUsed.select_victim(&blocks, &mut rng), 0);
}

#[test]
fn random_stays_in_bounds_and_covers_every_block() {
    let blocks = sample();
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = [false; 4];
    for _ in 0..200 {
        let victim = RandomReplacement.select_victim(&blocks, &mut rng);
        seen[victim] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn parses_policy_names() -> Result<(), Box<dyn Error>> {
    assert_eq!("LRU".parse::<Policy>()?, Policy::Lru);
    assert_eq!("fifo".parse::<Policy>()?, Policy::Fifo);
    assert_eq!("Random".parse::<Policy>()?, Policy::Random);
    assert!("PLRU".parse::<Policy>().is_err());
    assert_eq!(serde_json::from_str::<Policy>("\"MRU\"")?, Policy::Mru);
    assert_eq!(serde_json::from_str::<Policy>("\"lfu\"")?, Policy::Lfu);
    assert_eq!(serde_json::to_string(&Policy::Random)?, "\"Random\"");
    Ok(())
}
