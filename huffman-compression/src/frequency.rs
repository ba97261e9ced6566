use std::collections::BTreeMap;

use itertools::Itertools;

use crate::error::CodecError;

/// Occurrence count of every byte value present in an input.
///
/// Absent bytes have no entry; a present byte always has a count above zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable(BTreeMap<u8, u64>);

impl FrequencyTable {
    pub fn from_bytes(content: &[u8]) -> Self {
        let counts = content
            .iter()
            .copied()
            .counts()
            .into_iter()
            .map(|(symbol, count)| (symbol, count as u64))
            .collect();

        Self(counts)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.0.get(&symbol).copied()
    }

    /// Sum of all counts, i.e. the length of the input the table was built from.
    pub fn total(&self) -> u64 {
        self.0
            .values()
            .fold(0, |total: u64, &count| total.saturating_add(count))
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl TryFrom<BTreeMap<u8, i64>> for FrequencyTable {
    type Error = CodecError;

    fn try_from(counts: BTreeMap<u8, i64>) -> Result<Self, Self::Error> {
        let counts = counts
            .into_iter()
            .map(|(symbol, count)| match u64::try_from(count) {
                Ok(valid) if valid > 0 => Ok((symbol, valid)),
                _ => Err(CodecError::InvalidFrequencyTable { symbol, count }),
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        // every merged weight is bounded by the total, so it has to fit
        counts
            .values()
            .try_fold(0_u64, |total, &count| total.checked_add(count))
            .ok_or_else(|| CodecError::malformed("frequency counts add up past u64::MAX"))?;

        Ok(Self(counts))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;

    use super::FrequencyTable;
    use crate::error::CodecError;

    #[test]
    fn test_counting_bytes() {
        let table = FrequencyTable::from_bytes(b"aaabbc");

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'a'), Some(3));
        assert_eq!(table.get(b'b'), Some(2));
        assert_eq!(table.get(b'c'), Some(1));
        assert_eq!(table.get(b'd'), None);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = FrequencyTable::from_bytes(&[]);

        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_counts_cover_every_byte_value() {
        let content = (0..=255_u8).chain(0..=127_u8).collect::<Vec<_>>();
        let table = FrequencyTable::from_bytes(&content);

        assert_eq!(table.len(), 256);
        assert_eq!(table.total(), content.len() as u64);
        assert_eq!(table.get(0), Some(2));
        assert_eq!(table.get(200), Some(1));
        let symbols = table.iter().map(|(symbol, _)| symbol).collect::<Vec<_>>();
        assert_eq!(symbols, (0..=255_u8).collect::<Vec<_>>());
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn test_non_positive_counts_are_rejected(#[case] count: i64) {
        let counts = BTreeMap::from([(b'a', 3), (b'z', count)]);

        assert_eq!(
            FrequencyTable::try_from(counts),
            Err(CodecError::InvalidFrequencyTable {
                symbol: b'z',
                count
            })
        );
    }

    #[test]
    fn test_counts_overflowing_the_total_are_rejected() {
        let counts = BTreeMap::<u8, i64>::from([(0, i64::MAX), (1, i64::MAX), (2, i64::MAX)]);

        assert!(matches!(
            FrequencyTable::try_from(counts),
            Err(CodecError::MalformedArtifact(_))
        ));
    }

    #[test]
    fn test_counts_up_to_u64_max_are_accepted() {
        let counts = BTreeMap::<u8, i64>::from([(0, i64::MAX), (1, i64::MAX), (2, 1)]);
        let table = FrequencyTable::try_from(counts).unwrap();

        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn test_positive_counts_are_accepted() {
        let counts = BTreeMap::<u8, i64>::from([(b'a', 3), (b'b', 2), (b'c', 1)]);
        let table = FrequencyTable::try_from(counts).unwrap();

        assert_eq!(table, FrequencyTable::from_bytes(b"cbbaaa"));
    }
}
