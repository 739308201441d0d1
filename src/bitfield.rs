//! A `Bitfield` names a contiguous run of bits inside a 32 bit word so that it can be read out
//! right-aligned or written back in place.

use std::fmt::{Display, Formatter};

use crate::bytecode::Word;

/// The number of bits in a `Word`.
pub const WORD_BITS: u32 = 32;

/**
  An immutable `(start, length)` descriptor over a `Word`, counting `start` from the least
  significant bit. The mask is computed once, when the descriptor is built, so `extract` and
  `pack` are straight-line bit arithmetic.
*/
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Bitfield {
  start  : u32,
  length : u32,
  mask   : Word,
}

impl Bitfield {

  /**
    Describes the `length` bits starting at bit `start`.

    Panics if `length` is zero or if `start + length` exceeds 32. Descriptors are meant to be
    `const` items, in which case the panic becomes a compile error.
  */
  pub const fn new(start: u32, length: u32) -> Bitfield {
    assert!(length > 0, "a bitfield must be at least one bit wide");
    assert!(start + length <= WORD_BITS, "a bitfield must lie within a 32 bit word");

    Bitfield {
      start,
      length,
      mask: (Word::MAX >> (WORD_BITS - length)) << start
    }
  }

  pub const fn start(&self) -> u32 {
    self.start
  }

  pub const fn length(&self) -> u32 {
    self.length
  }

  /// The bits of the word this field occupies.
  pub const fn mask(&self) -> Word {
    self.mask
  }

  /// The largest value the field can hold.
  pub const fn max_value(&self) -> Word {
    self.mask >> self.start
  }

  /// Reads the field out of `word`, right-aligned.
  #[inline]
  pub const fn extract(&self, word: Word) -> Word {
    (word & self.mask) >> self.start
  }

  /**
    Returns `word` with the field's bits replaced by `value`. The value is not range checked:
    bits of `value` above the field's width are ORed into the bits above the field, or fall off
    the top of the word.
  */
  #[inline]
  pub const fn pack(&self, word: Word, value: Word) -> Word {
    (word & !self.mask) | (value << self.start)
  }

}

impl Display for Bitfield {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}..{}]", self.start, self.start + self.length)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn masks() {
    assert_eq!(Bitfield::new(0, 6).mask(), 0x0000_003F);
    assert_eq!(Bitfield::new(6, 8).mask(), 0x0000_3FC0);
    assert_eq!(Bitfield::new(14, 18).mask(), 0xFFFF_C000);
    assert_eq!(Bitfield::new(23, 9).mask(), 0xFF80_0000);
    assert_eq!(Bitfield::new(0, 32).mask(), Word::MAX);
  }

  #[test]
  fn max_value() {
    assert_eq!(Bitfield::new(6, 8).max_value(), 255);
    assert_eq!(Bitfield::new(14, 18).max_value(), 262_143);
  }

  #[test]
  fn extract_is_right_aligned() {
    let field = Bitfield::new(6, 8);
    assert_eq!(field.extract(0x0000_3FC0), 0xFF);
    assert_eq!(field.extract(0xFFFF_C03F), 0);
    assert_eq!(field.extract(0b1_0100_0000), 0b101);
  }

  #[test]
  fn pack_leaves_other_bits_alone() {
    let field = Bitfield::new(6, 8);
    let word  = field.pack(Word::MAX, 0);
    assert_eq!(word, 0xFFFF_C03F);
    assert_eq!(field.pack(word, 0xAB), 0xFFFF_EAFF);
  }

  #[test]
  fn pack_spills_wide_values() {
    let field = Bitfield::new(14, 9);
    let word  = field.pack(0, 0x3FF);
    assert_eq!(word, 0x00FF_C000);
    assert_eq!(field.extract(word), 0x1FF);
    // The tenth bit lands just above the field.
    assert_eq!(word & !field.mask(), 0x0080_0000);
  }

  #[test]
  fn pack_spill_is_ored_in() {
    let field = Bitfield::new(6, 8);
    let word  = field.pack(0x0000_C000, 0x1FF);
    assert_eq!(word, 0x0000_FFC0);
  }

  #[test]
  fn pack_drops_bits_past_end_of_word() {
    let field = Bitfield::new(23, 9);
    assert_eq!(field.pack(0x0000_003F, 0x3FF), 0xFF80_003F);
  }

  #[test]
  fn pack_then_extract() {
    let field = Bitfield::new(23, 9);
    for value in [0, 1, 255, 256, 511] {
      assert_eq!(field.extract(field.pack(0x1234_5678, value)), value);
    }
  }

  #[test]
  #[should_panic]
  fn field_past_end_of_word() {
    let _ = Bitfield::new(23, 18);
  }

  #[test]
  #[should_panic]
  fn empty_field() {
    let _ = Bitfield::new(4, 0);
  }

}
