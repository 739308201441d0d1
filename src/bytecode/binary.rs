/*!
  This module is responsible for the encoding and decoding of binary instructions, converting
  between a raw `Word` and its `(opcode, A, B, C)` components.
*/

use std::fmt::{Display, Formatter};

use super::{Instruction, Operand, Operation, Word};

/// Holds the unencoded components of an instruction. Operands the opcode's layout lacks are zero.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct DecodedInstruction {
  pub opcode : Operation,
  pub a      : Operand,
  pub b      : Operand,
  pub c      : Operand
}

impl DecodedInstruction {
  pub fn encode(&self) -> Word {
    encode_instruction(self.opcode, self.a, self.b, self.c)
  }
}

impl Display for DecodedInstruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ({}, {}, {})", self.opcode, self.a, self.b, self.c)
  }
}

/**
  Encodes the instruction into bytecode. Operands the opcode does not use are ignored, and
  bits of an operand wider than its field spill into the fields above it. It is the caller's
  responsibility to pass values that fit.
*/
pub fn encode_instruction(opcode: Operation, a: Operand, b: Operand, c: Operand) -> Word {
  Instruction::encode(opcode, a, b, c).word()
}

/// Decodes any word. Unrecognized opcodes come back as `Operation::Null` with zero operands.
pub fn decode_instruction(word: Word) -> DecodedInstruction {
  Instruction::new(word).decode()
}

/// Decodes a word, or returns `None` if its opcode field does not name an operation.
pub fn try_decode_instruction(word: Word) -> Option<DecodedInstruction> {
  let decoded = decode_instruction(word);
  match decoded.opcode.is_null() {
    true  => None,
    false => Some(decoded)
  }
}

/// Wraps each word of a code block as an `Instruction`.
pub fn decode_words(words: &[Word]) -> Vec<Instruction> {
  words.iter().copied().map(Instruction::new).collect()
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decode_known_words() {
    // MOVE 1 2
    assert_eq!(
      decode_instruction(0x0100_0040),
      DecodedInstruction { opcode: Operation::Move, a: 1, b: 2, c: 0 }
    );
    // LOADK 0 1
    assert_eq!(
      decode_instruction(0x0000_4001),
      DecodedInstruction { opcode: Operation::LoadK, a: 0, b: 1, c: 0 }
    );
    // RETURN 0 1
    assert_eq!(
      decode_instruction(0x0080_001E),
      DecodedInstruction { opcode: Operation::Return, a: 0, b: 1, c: 0 }
    );
    // JMP 1
    assert_eq!(
      decode_instruction(0x8000_0016),
      DecodedInstruction { opcode: Operation::Jmp, a: 0, b: 1, c: 0 }
    );
  }

  #[test]
  fn encode_known_words() {
    assert_eq!(encode_instruction(Operation::Move, 1, 2, 0), 0x0100_0040);
    assert_eq!(encode_instruction(Operation::LoadK, 0, 1, 0), 0x0000_4001);
    assert_eq!(encode_instruction(Operation::Return, 0, 1, 0), 0x0080_001E);
    assert_eq!(encode_instruction(Operation::Jmp, 0, 1, 0), 0x8000_0016);
    // C is dropped for MOVE.
    assert_eq!(encode_instruction(Operation::Move, 1, 2, 3), 0x0100_0040);
  }

  #[test]
  fn call_with_all_operands() {
    let word = encode_instruction(Operation::Call, 5, 3, 2);
    assert_eq!(word, 28 | (5 << 6) | (2 << 14) | (3 << 23));
    let decoded = decode_instruction(word);
    assert_eq!((decoded.a, decoded.b, decoded.c), (5, 3, 2));
    assert_eq!(decoded.encode(), word);
    assert_eq!(decoded.to_string(), "CALL (5, 3, 2)");
  }

  #[test]
  fn strict_decoding() {
    assert!(try_decode_instruction(0x0000_0026).is_none());
    assert!(try_decode_instruction(0xFFFF_FFFF).is_none());
    assert_eq!(
      try_decode_instruction(0x0000_0025).map(|d| d.opcode),
      Some(Operation::VarArg)
    );
  }

  #[test]
  fn decode_block() {
    let words = [0x0000_4001, 0x0080_001E, 0x0000_003F];
    let instructions = decode_words(&words);
    assert_eq!(instructions.len(), 3);
    assert_eq!(instructions[0].opcode(), Operation::LoadK);
    assert_eq!(instructions[1].opcode(), Operation::Return);
    assert!(instructions[2].opcode().is_null());
    assert_eq!(instructions[2].word(), 0x3F);
  }

}
