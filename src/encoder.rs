use std::path::Path;

use crate::{
    code::CodeTable,
    error::Error,
    file,
    format::Header,
    frequency::FrequencyTable,
    pack::{self, Packed},
    tree::Tree,
};

/// Compress the file at `input` into a new file at `output`.
///
/// `input` is read whole before `output` is touched, and `output` only
/// appears once it is completely written.
pub fn encode(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), Error> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let bytes = file::read(input)?;
    let encoded_len = encode_into(&bytes, output)?;
    log::debug!(
        "encoded {} ({} bytes) into {} ({} bytes)",
        input.display(),
        bytes.len(),
        output.display(),
        encoded_len
    );
    Ok(())
}

/// Compress `bytes` into a new file at `output`, returning the encoded size.
pub fn encode_into(bytes: &[u8], output: impl AsRef<Path>) -> Result<usize, Error> {
    let encoded = encode_bytes(bytes)?;
    file::write_atomically(output.as_ref(), &encoded)?;
    Ok(encoded.len())
}

/// Compress `bytes` into the encoded file format.
pub fn encode_bytes(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    let table = match code_table(bytes)? {
        Some(table) => table,
        None => {
            log::debug!("empty input, writing an empty table");
            return serialize(&Header::default(), &Packed::default());
        }
    };

    let packed = pack::pack(bytes.iter().map(|&symbol| &table[symbol]));
    log::debug!(
        "{} symbols, {} payload bits, {} padding bits",
        table.len(),
        packed.bit_len(),
        packed.padding
    );

    let header = Header {
        table,
        padding: packed.padding,
        original_length: bytes.len() as u64,
    };
    serialize(&header, &packed)
}

/// Huffman code table of `bytes`, or `None` for empty input.
pub fn code_table(bytes: &[u8]) -> Result<Option<CodeTable>, Error> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let frequencies = FrequencyTable::of(bytes);
    log::trace!("frequencies: {:?}", frequencies);
    let table = CodeTable::of(&Tree::new(frequencies)?);
    log::trace!("code table:\n{}", table);
    Ok(Some(table))
}

fn serialize(header: &Header, packed: &Packed) -> Result<Vec<u8>, Error> {
    let mut encoded = Vec::new();
    header
        .write(&mut encoded)
        .map_err(|err| Error::io("<memory>", err))?;
    encoded.extend_from_slice(&packed.bytes);
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DELIMITER;

    #[test]
    fn empty_input_is_header_only() {
        let encoded = encode_bytes(&[]).unwrap();
        assert_eq!(encoded.len(), 4 + 1 + 8 + 2 + DELIMITER.len());
        assert!(encoded.ends_with(&DELIMITER));
        assert!(code_table(&[]).unwrap().is_none());
    }

    #[test]
    fn aaab_has_a_one_byte_payload() {
        let encoded = encode_bytes(b"aaab").unwrap();
        let (header, offset) = Header::read(&encoded).unwrap();
        assert_eq!(header.original_length, 4);
        assert_eq!(header.padding, 4);
        assert_eq!(header.table.len(), 2);
        // b = 0, a = 1
        assert_eq!(&encoded[offset..], &[0b1110_0000u8]);
    }

    #[test]
    fn single_symbol_input_uses_one_bit_per_byte() {
        let encoded = encode_bytes(&[7; 20]).unwrap();
        let (header, offset) = Header::read(&encoded).unwrap();
        assert_eq!(header.table.get(7).unwrap().to_string(), "0");
        assert_eq!(header.padding, 4);
        assert_eq!(&encoded[offset..], &[0u8; 3]);
    }

    #[test]
    fn skewed_input_shrinks() {
        let mut input = vec![b'e'; 900];
        input.extend((0..100u8).map(|i| b'a' + i % 20));
        let encoded = encode_bytes(&input).unwrap();
        let (header, offset) = Header::read(&encoded).unwrap();
        let payload_bits = (encoded.len() - offset) * 8 - header.padding as usize;
        assert!(payload_bits < 8 * input.len());
    }

    #[test]
    fn encoding_is_reproducible() {
        let input = b"she sells sea shells by the sea shore";
        assert_eq!(encode_bytes(input).unwrap(), encode_bytes(input).unwrap());
    }

    #[test]
    fn unreadable_input_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("encoded.bin");
        let err = encode(dir.path().join("missing.txt"), &output).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!output.exists());
    }
}
