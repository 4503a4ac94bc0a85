use std::{
    collections::{hash_map, HashMap},
    hash::Hash,
};

/// count occurrences of each item
pub fn count_occurrences<I, T>(items: I) -> HashMap<T, usize>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    let mut occurrences: HashMap<T, usize> = HashMap::new();
    for item in items {
        *occurrences.entry(item).or_insert(0) += 1;
    }
    occurrences
}

/// Number of occurrences of every byte value present in an input.
///
/// Only bytes that occur are stored, so every count is at least one and the
/// counts sum to the input length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable(HashMap<u8, usize>);

impl FrequencyTable {
    /// scan `bytes` once and count each byte value
    pub fn of(bytes: &[u8]) -> Self {
        FrequencyTable(count_occurrences(bytes.iter().copied()))
    }

    pub fn get(&self, symbol: u8) -> Option<usize> {
        self.0.get(&symbol).copied()
    }

    /// number of distinct symbols
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// sum of all counts, equal to the length of the scanned input
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// pairs of symbol and count, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.0.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (u8, usize);
    type IntoIter = hash_map::IntoIter<u8, usize>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(u8, usize)> for FrequencyTable {
    /// zero counts are dropped
    fn from_iter<I: IntoIterator<Item = (u8, usize)>>(iter: I) -> Self {
        FrequencyTable(iter.into_iter().filter(|&(_, count)| count > 0).collect())
    }
}
