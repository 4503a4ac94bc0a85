//! Layout of an encoded file.
//!
//! All integers are little-endian.
//!
//! ```text
//! offset  size  field
//! 0       4     magic "HUF\x01"
//! 4       1     padding bits at the end of the payload, 0..=7
//! 5       8     original length in bytes
//! 13      2     number of table entries N, 0..=256
//! 15      ...   N entries: [symbol][code length L][ceil(L/8) code bytes, MSB-first]
//! ...     4     end-of-table delimiter "___\n"
//! ...     ...   packed payload
//! ```
//!
//! Entries are length-prefixed, so no symbol byte can be mistaken for the
//! delimiter; the delimiter only confirms that the table was read whole.

use std::{
    collections::HashSet,
    io::{self, Write},
};

use bitvec::prelude::*;

use crate::{
    code::{Code, CodeTable},
    error::{Corruption, Error},
};

pub const MAGIC: [u8; 4] = *b"HUF\x01";
pub const DELIMITER: [u8; 4] = *b"___\n";

/// Everything in front of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub table: CodeTable,
    pub padding: u8,
    pub original_length: u64,
}

impl Header {
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&MAGIC)?;
        writer.write_all(&[self.padding])?;
        writer.write_all(&self.original_length.to_le_bytes())?;

        let entries = self.table.len() as u16;
        writer.write_all(&entries.to_le_bytes())?;
        for (symbol, code) in self.table.iter() {
            // a tree over 256 leaves is at most 255 levels deep
            writer.write_all(&[symbol, code.len() as u8])?;
            writer.write_all(&code.to_bytes())?;
        }

        writer.write_all(&DELIMITER)
    }

    /// parse the header at the front of `data`, returning it with the offset
    /// of the first payload byte
    pub fn read(data: &[u8]) -> Result<(Self, usize), Error> {
        let mut reader = Reader { data, offset: 0 };

        if reader.take(MAGIC.len())? != MAGIC {
            return Err(Error::corrupt(0, Corruption::BadMagic));
        }

        let padding = reader.byte()?;
        if padding > 7 {
            return Err(Error::corrupt(reader.offset - 1, Corruption::InvalidPadding(padding)));
        }

        let mut length = [0u8; 8];
        length.copy_from_slice(reader.take(8)?);
        let original_length = u64::from_le_bytes(length);

        let mut entries = [0u8; 2];
        entries.copy_from_slice(reader.take(2)?);
        let entries = u16::from_le_bytes(entries);
        if entries > 256 {
            return Err(Error::corrupt(reader.offset - 2, Corruption::TooManyEntries(entries)));
        }

        let mut table = CodeTable::default();
        let mut codes = HashSet::new();
        for _ in 0..entries {
            let at = reader.offset;
            let symbol = reader.byte()?;
            let len = reader.byte()? as usize;
            if len == 0 {
                return Err(Error::corrupt(at, Corruption::InvalidCodeLength(symbol)));
            }
            let code = Code::from_bits(&reader.take((len + 7) / 8)?.view_bits::<Msb0>()[..len]);
            if !codes.insert(code.clone()) {
                return Err(Error::corrupt(at, Corruption::DuplicateCode(code.to_string())));
            }
            if table.insert(symbol, code).is_some() {
                return Err(Error::corrupt(at, Corruption::DuplicateSymbol(symbol)));
            }
        }
        if let Some((shorter, longer)) = table.prefix_violation() {
            return Err(Error::corrupt(
                reader.offset,
                Corruption::NotPrefixFree(shorter.to_string(), longer.to_string()),
            ));
        }

        let at = reader.offset;
        match reader.take(DELIMITER.len()) {
            Ok(delimiter) if delimiter == DELIMITER => (),
            _ => return Err(Error::corrupt(at, Corruption::MissingDelimiter)),
        }

        let header = Header {
            table,
            padding,
            original_length,
        };
        Ok((header, reader.offset))
    }
}

/// bounds-checked cursor over the encoded bytes
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let bytes = self
            .data
            .get(self.offset..self.offset + len)
            .ok_or_else(|| Error::corrupt(self.data.len(), Corruption::Truncated))?;
        self.offset += len;
        Ok(bytes)
    }

    fn byte(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }
}
