use bit_vec::BitVec;

use crate::{error::CodecError, prefix_code_table::CodeTable};

/// Concatenated codes, most significant bit first, zero padded up to a byte
/// boundary. `bit_count` excludes the padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    pub bit_count: usize,
    pub bytes: Vec<u8>,
}

pub fn pack(codes: &CodeTable, content: &[u8]) -> Result<PackedBits, CodecError> {
    let mut bits = BitVec::new();

    for &symbol in content {
        let code = codes
            .get(&symbol)
            .ok_or(CodecError::UnknownSymbol { symbol })?;
        code.iter().for_each(|&bit| bits.push(bit == 1));
    }

    Ok(PackedBits {
        bit_count: bits.len(),
        bytes: bits.to_bytes(),
    })
}

/// Reads back exactly `bit_count` bits, dropping the pad bits of the last byte.
pub fn unpack(bytes: &[u8], bit_count: usize) -> Result<BitVec, CodecError> {
    let available_bits = bytes.len() * 8;
    if available_bits < bit_count {
        return Err(CodecError::TruncatedStream {
            expected_bits: bit_count,
            remaining_bits: bit_count - available_bits,
        });
    }

    let needed_bytes = bit_count.div_ceil(8);
    if bytes.len() > needed_bytes {
        return Err(CodecError::malformed(format!(
            "{} bytes after the last of {bit_count} bits",
            bytes.len() - needed_bytes
        )));
    }

    let mut bits = BitVec::from_bytes(bytes);
    bits.truncate(bit_count);
    Ok(bits)
}
