//! Byte frequency analysis

/// Occurrence count for every byte value of an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequencies {
    counts: [u64; 256],
}

impl Default for Frequencies {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl Frequencies {
    /// Count each byte in a single pass.
    pub fn count(data: &[u8]) -> Self {
        let mut freq = Self::default();
        for &b in data {
            freq.counts[b as usize] += 1;
        }
        freq
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols that occur at least once, with their counts, in ascending
    /// byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i as u8, c))
    }

    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Shannon entropy in bits per byte.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for (_, f) in self.iter() {
            let p = f as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}

impl FromIterator<(u8, u64)> for Frequencies {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut freq = Self::default();
        for (symbol, count) in iter {
            freq.counts[symbol as usize] += count;
        }
        freq
    }
}
