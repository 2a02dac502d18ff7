#[cfg(test)]
mod test;

use itertools::Itertools;
use rand::Rng;

/// Uniformly samples a codepoint from a union of inclusive ranges, where a
/// range `[lo, hi]` contributes `hi - lo + 1` equally likely codepoints.
///
/// Ranges arrive flattened as `[lo0, hi0, lo1, hi1, ...]`, the layout the
/// instruction program stores them in. One codepoint and one-range inputs
/// are sampled directly; anything wider gets a Walker alias table over the
/// ranges, weighted by range width, so sampling costs two draws and a couple
/// of array reads no matter how many ranges a class has. Large Unicode
/// classes (`\w`, `\p{L}`) are the case that matters.
///
/// The table is kept entirely in integers: instead of normalizing each
/// weight to a float, `probs[k]` starts at `width_k * pairs` and thresholds
/// compare against the raw width sum. Mass is conserved exactly, so the
/// pairing loop always terminates with every leftover bucket at exactly
/// `sum`.
#[derive(Clone, Debug)]
pub struct RuneSampler {
    runes: Vec<char>,
    aliases: Vec<usize>,
    probs: Vec<u64>,
    sum: u64,
}

impl RuneSampler {
    pub fn new(runes: &[char]) -> RuneSampler {
        if runes.len() <= 2 {
            return RuneSampler {
                runes: runes.to_vec(),
                aliases: Vec::new(),
                probs: Vec::new(),
                sum: 0,
            };
        }

        let pairs = runes.len() / 2;
        let widths: Vec<u64> = runes
            .iter()
            .tuples()
            .map(|(lo, hi)| *hi as u64 - *lo as u64 + 1)
            .collect();
        let sum: u64 = widths.iter().sum();

        let mut aliases: Vec<usize> = (0..pairs).collect();
        let mut probs: Vec<u64> = widths.iter().map(|w| w * pairs as u64).collect();

        // Partition into heavy and light buckets from the two ends of a
        // single index buffer.
        let mut hl = vec![0usize; pairs];
        let mut h = 0;
        let mut l = pairs;
        for (k, &p) in probs.iter().enumerate() {
            if p > sum {
                hl[h] = k;
                h += 1;
            } else {
                l -= 1;
                hl[l] = k;
            }
        }

        // Each light bucket takes its deficit from some heavy bucket; a
        // heavy bucket that drops to or below the average joins the light
        // side. Exact integer mass conservation guarantees both sides run
        // out together.
        while h > 0 && l < pairs {
            let j = hl[l];
            let k = hl[h - 1];
            aliases[j] = k;
            probs[k] = probs[k] + probs[j] - sum;
            l += 1;
            if probs[k] <= sum {
                l -= 1;
                h -= 1;
                hl[l] = k;
            }
        }

        RuneSampler { runes: runes.to_vec(), aliases, probs, sum }
    }

    /// Draws one codepoint.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> char {
        if self.runes.len() == 1 {
            return self.runes[0];
        }

        let mut k = 0;
        if self.runes.len() > 2 {
            k = rng.gen_range(0..self.probs.len());
            let v = rng.gen_range(0..self.sum);
            if self.probs[k] <= v {
                k = self.aliases[k];
            }
        }

        let lo = self.runes[2 * k];
        let hi = self.runes[2 * k + 1];
        if lo == hi {
            return lo;
        }
        char::from_u32(rng.gen_range(lo as u32..=hi as u32))
            .expect("class ranges only contain valid scalar values")
    }
}
