use std::collections::BTreeMap;

use bit_vec::BitVec;

use crate::{
    error::CodecError,
    tree::{Node, Tree},
};

/// Symbol to code, each code element being a single bit: `0` for a left edge,
/// `1` for a right edge.
pub type CodeTable = BTreeMap<u8, Vec<u8>>;

impl Tree {
    /// Walks the tree left before right and records the path to every leaf.
    ///
    /// A tree made of a single leaf has no edges, so its symbol gets the code `0`.
    pub fn generate_codes(&self) -> CodeTable {
        let mut result = CodeTable::new();
        if let Node::Leaf { symbol, .. } = self.root() {
            result.insert(*symbol, vec![0]);
            return result;
        }

        let mut code = vec![];
        generate_codes_inner(self.root(), &mut code, &mut result);
        result
    }

    pub fn code_lengths(&self) -> BTreeMap<u8, usize> {
        self.generate_codes()
            .into_iter()
            .map(|(symbol, code)| (symbol, code.len()))
            .collect()
    }

    /// Follows `bits` from the root, emitting a symbol every time a leaf is
    /// reached. The last bit has to complete a code.
    pub fn decode(&self, bits: &BitVec) -> Result<Vec<u8>, CodecError> {
        let root = self.root();
        let mut decoded = Vec::new();
        let mut current = root;
        let mut code_start = 0;

        for (offset, bit) in bits.iter().enumerate() {
            let next = match (current, bit) {
                (Node::Internal { left, .. }, false) => left.as_ref(),
                (Node::Internal { right, .. }, true) => right.as_ref(),
                // lone leaf root, its code is `0`
                (Node::Leaf { .. }, false) if code_start == offset => current,
                (Node::Leaf { .. }, _) => {
                    return Err(CodecError::MissingCode { bit_offset: offset })
                }
            };

            match next {
                Node::Leaf { symbol, .. } => {
                    decoded.push(*symbol);
                    current = root;
                    code_start = offset + 1;
                }
                Node::Internal { .. } => current = next,
            }
        }

        if code_start != bits.len() {
            return Err(CodecError::TruncatedStream {
                expected_bits: bits.len(),
                remaining_bits: bits.len() - code_start,
            });
        }

        Ok(decoded)
    }
}

fn generate_codes_inner(node: &Node, current_code: &mut Vec<u8>, result: &mut CodeTable) {
    match node {
        Node::Leaf { symbol, .. } => {
            result.insert(*symbol, current_code.to_owned());
        }
        Node::Internal { left, right, .. } => {
            current_code.push(0);
            generate_codes_inner(left, current_code, result);
            current_code.pop();

            current_code.push(1);
            generate_codes_inner(right, current_code, result);
            current_code.pop();
        }
    }
}
