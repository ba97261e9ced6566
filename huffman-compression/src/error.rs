use derive_more::Display;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum CodecError {
    #[display(fmt = "cannot compress empty input")]
    EmptyInput,

    #[display(
        fmt = "invalid frequency table: symbol {} has non-positive count {}",
        symbol,
        count
    )]
    InvalidFrequencyTable { symbol: u8, count: i64 },

    #[display(fmt = "symbol {} has no code in the code table", symbol)]
    UnknownSymbol { symbol: u8 },

    #[display(fmt = "no leaf matches the code ending at bit {}", bit_offset)]
    MissingCode { bit_offset: usize },

    #[display(
        fmt = "bit stream truncated: {} of {} bits could not be decoded",
        remaining_bits,
        expected_bits
    )]
    TruncatedStream {
        expected_bits: usize,
        remaining_bits: usize,
    },

    #[display(fmt = "malformed artifact: {}", _0)]
    MalformedArtifact(String),
}

impl std::error::Error for CodecError {}

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CodecError::MalformedArtifact(reason.into())
    }
}
