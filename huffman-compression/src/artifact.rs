use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{error::CodecError, frequency::FrequencyTable};

const LINE_SEPARATOR: u8 = b'\n';

/// Everything needed to rebuild the original bytes.
///
/// On disk it is laid out as:
///
/// ```text
/// {"97":3,"98":2,"99":1}\n   frequency table, one line of JSON
/// 9\n                        number of meaningful bits
/// <packed bytes>             until the end, no terminator
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub frequencies: FrequencyTable,
    pub bit_count: usize,
    pub packed: Vec<u8>,
}

impl Artifact {
    pub fn serialize(&self) -> Vec<u8> {
        let table = self
            .frequencies
            .iter()
            .map(|(symbol, count)| (symbol.to_string(), Value::from(count)))
            .collect::<Map<_, _>>();
        let header = format!("{}\n{}\n", Value::Object(table), self.bit_count);

        let mut bytes = Vec::with_capacity(header.len() + self.packed.len());
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(&self.packed);
        bytes
    }

    pub fn parse(content: &[u8]) -> Result<Self, CodecError> {
        let (table_line, rest) = split_line(content)
            .ok_or_else(|| CodecError::malformed("missing frequency table line"))?;
        let (bit_count_line, packed) =
            split_line(rest).ok_or_else(|| CodecError::malformed("missing bit count line"))?;

        let counts = serde_json::from_slice::<BTreeMap<u8, i64>>(table_line)
            .map_err(|err| CodecError::malformed(format!("unreadable frequency table: {err}")))?;
        let frequencies = FrequencyTable::try_from(counts)?;
        if frequencies.is_empty() {
            return Err(CodecError::malformed("empty frequency table"));
        }

        let bit_count = std::str::from_utf8(bit_count_line)
            .ok()
            .filter(|line| !line.is_empty() && line.bytes().all(|byte| byte.is_ascii_digit()))
            .and_then(|line| line.parse::<usize>().ok())
            .ok_or_else(|| {
                CodecError::malformed(format!(
                    "bit count {:?} is not a non-negative integer",
                    String::from_utf8_lossy(bit_count_line)
                ))
            })?;

        Ok(Artifact {
            frequencies,
            bit_count,
            packed: packed.to_vec(),
        })
    }
}

fn split_line(content: &[u8]) -> Option<(&[u8], &[u8])> {
    let end = content.iter().position(|&byte| byte == LINE_SEPARATOR)?;
    Some((&content[..end], &content[end + 1..]))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Artifact;
    use crate::{error::CodecError, frequency::FrequencyTable};

    fn artifact() -> Artifact {
        Artifact {
            frequencies: FrequencyTable::from_bytes(b"aaabbc"),
            bit_count: 9,
            packed: vec![0b0001_1111, 0b0000_0000],
        }
    }

    #[test]
    fn test_layout() {
        let bytes = artifact().serialize();

        let mut expected = b"{\"97\":3,\"98\":2,\"99\":1}\n9\n".to_vec();
        expected.extend([0b0001_1111, 0b0000_0000]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_parse_written_artifact() {
        let parsed = Artifact::parse(&artifact().serialize()).unwrap();

        assert_eq!(parsed, artifact());
    }

    #[test]
    fn test_packed_bytes_may_contain_newlines() {
        let artifact = Artifact {
            frequencies: FrequencyTable::from_bytes(b"\n\n\nx"),
            bit_count: 16,
            packed: vec![b'\n', b'\n'],
        };

        assert_eq!(Artifact::parse(&artifact.serialize()).unwrap(), artifact);
    }

    #[rstest]
    #[case(b"")]
    #[case(b"{\"97\":3}")]
    #[case(b"{\"97\":3}\n9")]
    #[case(b"not json\n9\n")]
    #[case(b"{\"300\":3}\n9\n")]
    #[case(b"{\"97\":1.5}\n9\n")]
    #[case(b"{}\n0\n")]
    #[case(b"{\"97\":3}\nnine\n")]
    #[case(b"{\"97\":3}\n-9\n")]
    #[case(b"{\"97\":3}\n+9\n")]
    #[case(b"{\"97\":3}\n 9\n")]
    #[case(b"{\"97\":3}\n\n")]
    #[case(b"{\"0\":9223372036854775807,\"1\":9223372036854775807,\"2\":9223372036854775807}\n2\n\x00")]
    fn test_malformed(#[case] content: &[u8]) {
        assert!(matches!(
            Artifact::parse(content),
            Err(CodecError::MalformedArtifact(_))
        ));
    }

    #[rstest]
    #[case(b"{\"97\":3,\"98\":0}\n4\n\x00", b'b', 0)]
    #[case(b"{\"97\":-3}\n4\n\x00", b'a', -3)]
    fn test_non_positive_count(#[case] content: &[u8], #[case] symbol: u8, #[case] count: i64) {
        assert_eq!(
            Artifact::parse(content),
            Err(CodecError::InvalidFrequencyTable { symbol, count })
        );
    }
}
