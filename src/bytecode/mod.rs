/*!

  The Lua 5.1 virtual machine uses a fixed 32 bit instruction word. The low six bits hold the
  opcode and the remaining 26 bits hold up to three operands, laid out as follows (bit 0 is the
  least significant bit):

    Opcode:  bits  0..6
    A:       bits  6..14
    C:       bits 14..23
    B:       bits 23..32
    Bx:      bits 14..32  (B and C read together as one unsigned field)
    sBx:     bits 14..32  (Bx biased by 131071 to hold a signed value)

  Which of those fields an instruction actually has is a property of its opcode, recorded in the
  opcode's `OperandLayout`. B, Bx, and sBx are three readings of overlapping bits, so a layout
  picks at most one of them.

  Decoding is permissive. An opcode outside the instruction set decodes to `Operation::Null`, and
  an operand the layout lacks reads as zero and ignores writes. This lets a disassembler walk
  foreign or corrupted bytecode without stopping at the first bad word.

*/

mod assembly;
mod binary;
mod instruction;
mod layout;

pub use assembly::{parse_assembly, ParsedAssemblySyntax};
pub use binary::{decode_instruction, decode_words, encode_instruction, try_decode_instruction,
                 DecodedInstruction};
pub use instruction::{Instruction, Operand, OperandField, A_FIELD, BX_FIELD, B_FIELD, C_FIELD,
                      MAXARG_A, MAXARG_B, MAXARG_BX, MAXARG_C, MAX_SBX, MIN_SBX, OPCODE_FIELD,
                      SBX_BIAS};
pub use layout::{BOperand, OperandLayout};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display as StrumDisplay, EnumCount, EnumIter, EnumString, IntoStaticStr};

pub type Word = u32;

/**
  Opcodes of the virtual machine.

  The discriminants are the values stored in an instruction's opcode field, so the order the
  opcodes are listed below is significant. `Null` is not part of the instruction set. It stands
  for any opcode field value that does not name an operation and always sits after the last real
  opcode.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter, EnumCount, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum Operation {
  // Moves and loads //
  Move,         // R(A) := R(B)
  LoadK,        // R(A) := Kst(Bx)
  LoadBool,     // R(A) := (Bool)B; if (C) pc++
  LoadNil,      // R(A) := ... := R(B) := nil
  GetUpval,     // R(A) := UpValue[B]
  // Opcode 5

  // Table and global access //
  GetGlobal,    // R(A) := Gbl[Kst(Bx)]
  GetTable,     // R(A) := R(B)[RK(C)]
  SetGlobal,    // Gbl[Kst(Bx)] := R(A)
  SetUpval,     // UpValue[B] := R(A)
  SetTable,     // R(A)[RK(B)] := RK(C)
  NewTable,     // R(A) := {} (size = B,C)
  #[strum(serialize = "SELF")]
  SelfOp,       // R(A+1) := R(B); R(A) := R(B)[RK(C)]
  // Opcode 12

  // Arithmetic //
  Add,          // R(A) := RK(B) + RK(C)
  Sub,          // R(A) := RK(B) - RK(C)
  Mul,          // R(A) := RK(B) * RK(C)
  Div,          // R(A) := RK(B) / RK(C)
  Mod,          // R(A) := RK(B) % RK(C)
  Pow,          // R(A) := RK(B) ^ RK(C)
  Unm,          // R(A) := -R(B)
  Not,          // R(A) := not R(B)
  Len,          // R(A) := length of R(B)
  Concat,       // R(A) := R(B).. ... ..R(C)
  // Opcode 22

  // Control flow //
  Jmp,          // pc += sBx
  Eq,           // if ((RK(B) == RK(C)) ~= A) then pc++
  Lt,           // if ((RK(B) <  RK(C)) ~= A) then pc++
  Le,           // if ((RK(B) <= RK(C)) ~= A) then pc++
  Test,         // if not (R(A) <=> C) then pc++
  TestSet,      // if (R(B) <=> C) then R(A) := R(B) else pc++
  Call,         // R(A), ... ,R(A+C-2) := R(A)(R(A+1), ... ,R(A+B-1))
  TailCall,     // return R(A)(R(A+1), ... ,R(A+B-1))
  Return,       // return R(A), ... ,R(A+B-2)
  ForLoop,      // R(A) += R(A+2); if R(A) <?= R(A+1) then { pc += sBx; R(A+3) := R(A) }
  ForPrep,      // R(A) -= R(A+2); pc += sBx
  TForLoop,     // R(A+3), ... ,R(A+2+C) := R(A)(R(A+1), R(A+2))
  // Opcode 34

  // Closures and varargs //
  SetList,      // R(A)[(C-1)*FPF+i] := R(A+i), 1 <= i <= B
  Close,        // close all variables in the stack up to (>=) R(A)
  Closure,      // R(A) := closure(KPROTO[Bx], R(A), ... ,R(A+n))
  VarArg,       // R(A), R(A+1), ..., R(A+B-1) = vararg
  // Opcode 38

  #[strum(serialize = "NULL")]
  Null,
}

/// The number of opcode field values that name a real operation.
pub const OPERATION_COUNT: usize = Operation::COUNT - 1;

impl Operation {

  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Maps an opcode field value to its operation, or to `Operation::Null` if it names none.
  pub fn from_code(code: u8) -> Operation {
    match Operation::try_from(code) {
      Ok(operation) => operation,
      Err(_e) => Operation::Null
    }
  }

  pub fn is_null(&self) -> bool {
    *self == Operation::Null
  }

  /// The mnemonic, e.g. `"LOADK"`.
  pub fn name(&self) -> &'static str {
    self.into()
  }

  /// Which operand fields an instruction with this opcode carries.
  pub fn layout(&self) -> OperandLayout {
    layout::layout_of(self.code())
  }

}
