use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Errors returned by [`encode`](crate::encode) and [`decode`](crate::decode).
#[derive(Debug, Error)]
pub enum Error {
    /// opening, reading, writing or renaming a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// the encoded stream does not follow the file format
    #[error("corrupt stream: {0}")]
    CorruptStream(At<Corruption>),

    /// a code tree was requested for an input with no symbols
    #[error("cannot build a code tree from an empty alphabet")]
    EmptyAlphabet,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(offset: usize, is: Corruption) -> Self {
        Error::CorruptStream(At { offset, is })
    }

    /// the corruption kind, if this is a [`Error::CorruptStream`]
    pub fn corruption(&self) -> Option<&Corruption> {
        match self {
            Error::CorruptStream(at) => Some(&at.is),
            _ => None,
        }
    }
}

/// Locates a problem inside the encoded stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct At<T> {
    /// number of bytes from the start of the encoded stream
    pub offset: usize,
    pub is: T,
}

impl<T: fmt::Display> fmt::Display for At<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.is, self.offset)
    }
}

/// What is wrong with an encoded stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Corruption {
    #[error("missing magic number")]
    BadMagic,

    /// the stream ended inside the header
    #[error("stream ends inside the header")]
    Truncated,

    #[error("padding of {0} bits is not in 0..=7")]
    InvalidPadding(u8),

    /// a code length of zero
    #[error("code of symbol {0:#04x} has zero length")]
    InvalidCodeLength(u8),

    #[error("header declares {0} entries, more than there are byte values")]
    TooManyEntries(u16),

    /// same symbol has been associated with two codes
    #[error("symbol {0:#04x} is defined twice")]
    DuplicateSymbol(u8),

    /// same code has been associated with two symbols
    #[error("code {0} is assigned to two symbols")]
    DuplicateCode(String),

    /// one code is a prefix of another, so decoding would be ambiguous
    #[error("code {0} is a prefix of code {1}")]
    NotPrefixFree(String, String),

    #[error("end-of-table delimiter is missing")]
    MissingDelimiter,

    /// payload bits that no code in the table matches
    #[error("payload bits match no code")]
    UnmatchedBits,

    /// the payload ran out before the recorded length was reached
    #[error("expected {expected} bytes, payload only holds {decoded}")]
    LengthMismatch { expected: usize, decoded: usize },

    /// meaningful bits remain after the recorded length was reached
    #[error("{0} meaningful bits follow the last symbol")]
    TrailingPayload(usize),
}
