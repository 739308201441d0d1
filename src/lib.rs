/*!
  Encoding and decoding of Lua 5.1 virtual machine instruction words.

  An `Instruction` wraps one 32 bit word and exposes its opcode and its A, B, and C operands.
  Which bits back each operand depends on the opcode's `OperandLayout`. Decoding never fails:
  unknown opcodes read as `Operation::Null` and missing operands read as zero.

  ```
  use luacodec::bytecode::{Instruction, Operation};

  let word = Instruction::encode(Operation::ForLoop, 3, -10, 0).word();
  let instruction = Instruction::new(word);
  assert_eq!(instruction.opcode(), Operation::ForLoop);
  assert_eq!(instruction.b(), -10);
  assert_eq!(instruction.to_string(), "FORLOOP (3, -10, 0)");
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod bitfield;
pub mod bytecode;
pub mod listing;

pub use bitfield::Bitfield;
pub use bytecode::{DecodedInstruction, Instruction, Operation, OperandLayout, Word};
pub use listing::Listing;
