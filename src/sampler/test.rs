use std::collections::HashMap;

use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::RuneSampler;

const SAMPLES_PER_RUNE: usize = 100_000;
const ALLOWED_ERROR: usize = 2_000;

#[test]
fn test_rune_distribution() {
    let mut rng: SmallRng = SeedableRng::seed_from_u64(1);
    let inputs: Vec<Vec<char>> = vec![
        vec!['a'],
        vec!['a', 'a'],
        vec!['a', 'z'],
        vec!['a', 'z', 'A', 'A'],
        vec!['a', 'z', 'A', 'Z', '0', '9'],
    ];

    for runes in &inputs {
        let num: usize = if runes.len() == 1 {
            1
        } else {
            runes
                .iter()
                .tuples()
                .map(|(lo, hi)| *hi as usize - *lo as usize + 1)
                .sum()
        };

        let sampler = RuneSampler::new(runes);
        let mut count: HashMap<char, usize> = HashMap::new();
        for _ in 0..SAMPLES_PER_RUNE * num {
            *count.entry(sampler.generate(&mut rng)).or_insert(0) += 1;
        }

        assert_eq!(count.len(), num, "{:?}: some codepoints never sampled", runes);
        for (r, c) in &count {
            assert!(
                (SAMPLES_PER_RUNE - ALLOWED_ERROR..=SAMPLES_PER_RUNE + ALLOWED_ERROR).contains(c),
                "{:?}: incorrect count of '{}' ({})",
                runes,
                r,
                c
            );
        }
    }
}

#[test]
fn test_single_rune() {
    let mut rng: SmallRng = SeedableRng::seed_from_u64(0x12345678);
    let sampler = RuneSampler::new(&['こ']);
    for _ in 0..1000 {
        assert_eq!(sampler.generate(&mut rng), 'こ');
    }
}

#[test]
fn test_samples_stay_in_ranges() {
    let mut rng: SmallRng = SeedableRng::seed_from_u64(0x12345678);
    // Uneven widths force the alias table through reclassification.
    let runes = ['a', 'z', '0', '1', 'あ', 'ん', 'A', 'A'];
    let sampler = RuneSampler::new(&runes);
    for _ in 0..100_000 {
        let c = sampler.generate(&mut rng);
        let ok = ('a'..='z').contains(&c)
            || ('0'..='1').contains(&c)
            || ('あ'..='ん').contains(&c)
            || c == 'A';
        assert!(ok, "sampled '{}' outside every range", c);
    }
}
