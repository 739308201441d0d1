use std::fmt::{Display, Formatter};

use crate::bitfield::Bitfield;
use super::{BOperand, DecodedInstruction, Operation, OperandLayout, Word};

/// Operand values. Signed so that sBx shares a type with the unsigned fields.
pub type Operand = i32;

pub const OPCODE_FIELD : Bitfield = Bitfield::new(0, 6);
pub const A_FIELD      : Bitfield = Bitfield::new(6, 8);
pub const C_FIELD      : Bitfield = Bitfield::new(14, 9);
pub const BX_FIELD     : Bitfield = Bitfield::new(14, 18);
// Nine bits: B sits above C and the word ends at bit 32.
pub const B_FIELD      : Bitfield = Bitfield::new(23, 9);

pub const MAXARG_A  : Operand = A_FIELD.max_value() as Operand;
pub const MAXARG_B  : Operand = B_FIELD.max_value() as Operand;
pub const MAXARG_C  : Operand = C_FIELD.max_value() as Operand;
pub const MAXARG_BX : Operand = BX_FIELD.max_value() as Operand;

/// Stored Bx = sBx + `SBX_BIAS`. Raw 0 is `MIN_SBX`, raw `MAXARG_BX` is `MAX_SBX`.
pub const SBX_BIAS : Operand = MAXARG_BX >> 1;
pub const MIN_SBX  : Operand = -SBX_BIAS;
pub const MAX_SBX  : Operand = MAXARG_BX - SBX_BIAS;

/// The three operand slots of an instruction as seen through its accessors.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum OperandField {
  A,
  B,
  C,
}

impl Display for OperandField {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      OperandField::A => write!(f, "A"),
      OperandField::B => write!(f, "B"),
      OperandField::C => write!(f, "C"),
    }
  }
}

/**
  A single encoded instruction word.

  Every accessor routes through the layout of the instruction's current opcode. An operand the
  layout does not have reads as zero, and writing it leaves the word untouched, so callers may
  read or write any operand without first checking the opcode. Writes are not range checked:
  bits beyond a field's width spill into the fields above it, as they would in the hardware
  encoding. Use `parse_assembly` when values need validating.

  Set the opcode before the operands. Operand writes consult the layout of whatever opcode the
  word holds at the time.
*/
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct Instruction(Word);

impl Instruction {

  pub fn new(word: Word) -> Instruction {
    Instruction(word)
  }

  /// Packs an opcode and its operands into a fresh word.
  pub fn encode(opcode: Operation, a: Operand, b: Operand, c: Operand) -> Instruction {
    let mut instruction = Instruction::default();
    instruction.set_opcode(opcode);
    instruction.set_a(a);
    instruction.set_b(b);
    instruction.set_c(c);
    instruction
  }

  pub fn word(&self) -> Word {
    self.0
  }

  /// The opcode field as stored, whether or not it names an operation.
  pub fn raw_opcode(&self) -> u8 {
    OPCODE_FIELD.extract(self.0) as u8
  }

  /// Writes any value into the opcode field, whether or not it names an operation.
  pub fn set_raw_opcode(&mut self, code: u8) {
    self.0 = OPCODE_FIELD.pack(self.0, code as Word);
  }

  pub fn opcode(&self) -> Operation {
    Operation::from_code(self.raw_opcode())
  }

  pub fn set_opcode(&mut self, opcode: Operation) {
    self.0 = OPCODE_FIELD.pack(self.0, opcode.code() as Word);
  }

  pub fn layout(&self) -> OperandLayout {
    self.opcode().layout()
  }

  pub fn a(&self) -> Operand {
    match self.layout().has_a() {
      true  => A_FIELD.extract(self.0) as Operand,
      false => 0
    }
  }

  pub fn set_a(&mut self, value: Operand) {
    if self.layout().has_a() {
      self.0 = A_FIELD.pack(self.0, value as Word);
    }
  }

  pub fn b(&self) -> Operand {
    match self.layout().b_operand() {
      Some(BOperand::B)        => B_FIELD.extract(self.0) as Operand,
      Some(BOperand::Bx)       => BX_FIELD.extract(self.0) as Operand,
      Some(BOperand::SignedBx) => BX_FIELD.extract(self.0) as Operand - SBX_BIAS,
      None                     => 0
    }
  }

  pub fn set_b(&mut self, value: Operand) {
    self.0 = match self.layout().b_operand() {
      Some(BOperand::B)        => B_FIELD.pack(self.0, value as Word),
      Some(BOperand::Bx)       => BX_FIELD.pack(self.0, value as Word),
      Some(BOperand::SignedBx) => BX_FIELD.pack(self.0, value.wrapping_add(SBX_BIAS) as Word),
      None                     => self.0
    };
  }

  pub fn c(&self) -> Operand {
    match self.layout().has_c() {
      true  => C_FIELD.extract(self.0) as Operand,
      false => 0
    }
  }

  pub fn set_c(&mut self, value: Operand) {
    if self.layout().has_c() {
      self.0 = C_FIELD.pack(self.0, value as Word);
    }
  }

  pub fn operands(&self) -> (Operand, Operand, Operand) {
    (self.a(), self.b(), self.c())
  }

  pub fn decode(&self) -> DecodedInstruction {
    DecodedInstruction {
      opcode : self.opcode(),
      a      : self.a(),
      b      : self.b(),
      c      : self.c()
    }
  }

}

impl From<Word> for Instruction {
  fn from(word: Word) -> Instruction {
    Instruction(word)
  }
}

impl From<Instruction> for Word {
  fn from(instruction: Instruction) -> Word {
    instruction.0
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ({}, {}, {})", self.opcode(), self.a(), self.b(), self.c())
  }
}
