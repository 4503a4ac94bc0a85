use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    ops::Index,
    str,
};

use bitvec::prelude::*;

use crate::tree::{Node, Tree};

/// A non-empty bit-string assigned to one symbol, first bit first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code(BitVec<u8, Msb0>);

impl Code {
    pub fn new() -> Self {
        Code(BitVec::new())
    }

    pub fn from_bits(bits: &BitSlice<u8, Msb0>) -> Self {
        Code(bits.to_bitvec())
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// copy of this code with one more bit at the end
    fn extended(&self, bit: bool) -> Self {
        let mut code = self.clone();
        code.push(bit);
        code
    }

    /// whether `self` is a prefix of `other` (every code is a prefix of itself)
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() <= other.len() && other.0[..self.len()] == self.0[..]
    }

    /// the bits packed MSB-first into bytes, the last byte zero padded
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bits = self.0.clone();
        bits.resize((self.len() + 7) / 8 * 8, false);
        bits.into_vec()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for bit in self.0.iter().by_vals() {
            write!(f, "{}", if bit { 1 } else { 0 })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCodeError {
    Empty,
    NonBinary,
}

impl str::FromStr for Code {
    type Err = ParseCodeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseCodeError::Empty);
        }
        s.bytes()
            .map(|byte| match byte {
                b'0' => Ok(false),
                b'1' => Ok(true),
                _ => Err(ParseCodeError::NonBinary),
            })
            .collect::<Result<BitVec<u8, Msb0>, _>>()
            .map(Code)
    }
}

/// Maps every symbol of a tree to the path leading to its leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable(BTreeMap<u8, Code>);

impl CodeTable {
    /// walk the tree, `0` for left and `1` for right
    ///
    /// A tree made of a single leaf has no path to walk, so its symbol gets
    /// the one-bit code `0`.
    pub fn of(tree: &Tree) -> Self {
        fn recur(code: Code, current: &Node, table: &mut BTreeMap<u8, Code>) {
            match current {
                Node::Leaf { symbol, .. } => {
                    table.insert(*symbol, code);
                }
                Node::Internal { left, right, .. } => {
                    recur(code.extended(false), left, table);
                    recur(code.extended(true), right, table);
                }
            }
        }

        let mut table = BTreeMap::new();
        match tree.root() {
            Node::Leaf { symbol, .. } => {
                table.insert(*symbol, Code::new().extended(false));
            }
            root => recur(Code::new(), root, &mut table),
        }
        CodeTable(table)
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.0.get(&symbol)
    }

    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.0.insert(symbol, code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// length of the longest code, zero for an empty table
    pub fn max_len(&self) -> usize {
        self.0.values().map(Code::len).max().unwrap_or(0)
    }

    /// symbols and their codes in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.0.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// first pair of codes where one is a prefix of the other, if any
    pub fn prefix_violation(&self) -> Option<(&Code, &Code)> {
        // after sorting, a code that prefixes others sorts right before the first of them
        let mut codes = self.0.values().collect::<Vec<&Code>>();
        codes.sort_unstable_by(|a, b| a.bits().iter().by_vals().cmp(b.bits().iter().by_vals()));
        codes
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .find(|(shorter, longer)| shorter.is_prefix_of(longer))
    }

    /// no code is a prefix of another one
    pub fn is_prefix_free(&self) -> bool {
        self.prefix_violation().is_none()
    }

    /// inverse mapping, from code to symbol
    pub fn reverse(&self) -> ReverseCodeTable {
        ReverseCodeTable {
            max_len: self.max_len(),
            symbols: self
                .0
                .iter()
                .map(|(&symbol, code)| (code.clone(), symbol))
                .collect(),
        }
    }
}

/// panics if `symbol` has no code, like indexing a map
impl Index<u8> for CodeTable {
    type Output = Code;
    fn index(&self, symbol: u8) -> &Code {
        &self.0[&symbol]
    }
}

/// Each symbol and its code on its own line, tab separated.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for (symbol, code) in self.iter() {
            if symbol.is_ascii_graphic() {
                writeln!(f, "{}\t{}", symbol as char, code)?;
            } else {
                writeln!(f, "{:#04x}\t{}", symbol, code)?;
            }
        }
        Ok(())
    }
}

/// Code to symbol lookup used while decoding.
#[derive(Debug, Clone, Default)]
pub struct ReverseCodeTable {
    symbols: HashMap<Code, u8>,
    max_len: usize,
}

impl ReverseCodeTable {
    pub fn get(&self, code: &Code) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    /// length of the longest code; a longer candidate can never match
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
