use std::path::Path;

use crate::{
    code::{Code, ReverseCodeTable},
    error::{Corruption, Error},
    file,
    format::Header,
    pack,
};

/// Decompress the file at `input` into a new file at `output`.
///
/// `output` is only created once the whole input decoded successfully.
pub fn decode(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), Error> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let encoded = file::read(input)?;
    let decoded = decode_bytes(&encoded)?;
    file::write_atomically(output, &decoded)?;
    log::debug!(
        "decoded {} ({} bytes) into {} ({} bytes)",
        input.display(),
        encoded.len(),
        output.display(),
        decoded.len()
    );
    Ok(())
}

/// Decompress an encoded stream held in memory.
pub fn decode_bytes(encoded: &[u8]) -> Result<Vec<u8>, Error> {
    let (header, offset) = Header::read(encoded)?;
    let payload = &encoded[offset..];
    let bits = pack::unpack(payload, header.padding).ok_or_else(|| {
        Error::corrupt(offset, Corruption::InvalidPadding(header.padding))
    })?;
    log::debug!(
        "{} table entries, {} payload bits, expecting {} bytes",
        header.table.len(),
        bits.len(),
        header.original_length
    );

    let expected = header.original_length as usize;
    let mut matcher = Matcher::new(header.table.reverse());
    let mut decoded = Vec::with_capacity(expected.min(bits.len()));
    let mut consumed = 0;
    for bit in bits.iter().by_vals() {
        if decoded.len() == expected {
            break;
        }
        consumed += 1;
        match matcher.feed(bit) {
            Step::Pending => (),
            Step::Symbol(symbol) => decoded.push(symbol),
            Step::Unmatched => {
                return Err(Error::corrupt(
                    offset + (consumed - 1) / 8,
                    Corruption::UnmatchedBits,
                ))
            }
        }
    }

    let remaining = bits.len() - consumed;
    if decoded.len() < expected {
        let is = if matcher.is_pending() {
            Corruption::UnmatchedBits
        } else {
            Corruption::LengthMismatch {
                expected,
                decoded: decoded.len(),
            }
        };
        return Err(Error::corrupt(encoded.len(), is));
    }
    if remaining > 0 {
        return Err(Error::corrupt(
            offset + consumed / 8,
            Corruption::TrailingPayload(remaining),
        ));
    }
    Ok(decoded)
}

/// What happened after feeding one more bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// the candidate is a proper prefix of some code
    Pending,
    /// the candidate matched a code and was reset
    Symbol(u8),
    /// the candidate grew longer than any code
    Unmatched,
}

/// Greedy prefix matcher: grows a candidate one bit at a time and emits a
/// symbol as soon as the candidate equals a code. Since no code is a prefix
/// of another, the first match is the only possible one.
struct Matcher {
    table: ReverseCodeTable,
    candidate: Code,
}

impl Matcher {
    fn new(table: ReverseCodeTable) -> Self {
        Matcher {
            table,
            candidate: Code::new(),
        }
    }

    fn feed(&mut self, bit: bool) -> Step {
        self.candidate.push(bit);
        if let Some(symbol) = self.table.get(&self.candidate) {
            self.candidate.clear();
            Step::Symbol(symbol)
        } else if self.candidate.len() >= self.table.max_len() {
            Step::Unmatched
        } else {
            Step::Pending
        }
    }

    fn is_pending(&self) -> bool {
        !self.candidate.is_empty()
    }
}
