use bitvec::prelude::*;

use crate::code::Code;

/// Bit-packed codes together with the number of zero bits appended to reach
/// a byte boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packed {
    pub bytes: Vec<u8>,
    /// always in `0..=7`
    pub padding: u8,
}

impl Packed {
    /// number of meaningful bits
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 - self.padding as usize
    }
}

/// number of zero bits needed to round `bits` up to a whole byte
pub fn padding_for(bits: usize) -> u8 {
    ((8 - bits % 8) % 8) as u8
}

/// concatenate `codes` in order and pack them MSB-first into bytes
pub fn pack<'a, I>(codes: I) -> Packed
where
    I: IntoIterator<Item = &'a Code>,
{
    let mut bits: BitVec<u8, Msb0> = BitVec::new();
    for code in codes {
        bits.extend_from_bitslice(code.bits());
    }
    let padding = padding_for(bits.len());
    bits.resize(bits.len() + padding as usize, false);
    Packed {
        bytes: bits.into_vec(),
        padding,
    }
}

/// the meaningful bits of `bytes`, dropping `padding` trailing bits
///
/// Returns `None` when `padding` is larger than the packed bits.
pub fn unpack(bytes: &[u8], padding: u8) -> Option<&BitSlice<u8, Msb0>> {
    let bits = bytes.view_bits::<Msb0>();
    let len = bits.len().checked_sub(padding as usize)?;
    Some(&bits[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(strs: &[&str]) -> Vec<Code> {
        strs.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn padding_is_between_zero_and_seven() {
        assert_eq!(padding_for(0), 0);
        assert_eq!(padding_for(1), 7);
        assert_eq!(padding_for(7), 1);
        assert_eq!(padding_for(8), 0);
        assert_eq!(padding_for(13), 3);
    }

    #[test]
    fn aaab_packs_into_one_byte() {
        // a = 1, b = 0
        let codes = codes(&["1", "1", "1", "0"]);
        let packed = pack(&codes);
        assert_eq!(packed.bytes, vec![0b1110_0000]);
        assert_eq!(packed.padding, 4);
        assert_eq!(packed.bit_len(), 4);
    }

    #[test]
    fn codes_spanning_bytes_keep_their_order() {
        let codes = codes(&["101", "11111", "0001", "1"]);
        let packed = pack(&codes);
        assert_eq!(packed.bytes, vec![0b1011_1111, 0b0001_1000]);
        assert_eq!(packed.padding, 3);
    }

    #[test]
    fn whole_bytes_need_no_padding() {
        let codes = codes(&["0000", "1111"]);
        let packed = pack(&codes);
        assert_eq!(packed.bytes, vec![0b0000_1111]);
        assert_eq!(packed.padding, 0);
    }

    #[test]
    fn nothing_packs_into_nothing() {
        assert_eq!(pack(&Vec::<Code>::new()), Packed::default());
    }

    #[test]
    fn unpack_drops_exactly_the_padding() {
        let bits = unpack(&[0b1011_1111, 0b0001_1000], 3).unwrap();
        assert_eq!(bits.len(), 13);
        assert_eq!(bits, bits![u8, Msb0; 1, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1]);
        assert!(unpack(&[], 1).is_none());
    }
}
