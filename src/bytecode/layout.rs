/*!
  Each opcode encodes its operands in one of a handful of physical layouts. The layout decides
  which of the A, B, and C accessors of an `Instruction` reach real bits, and which of the three
  readings (B, Bx, sBx) backs the B accessor.
*/

use std::fmt::{Display, Formatter};

use super::{Operation, OperandField, OPERATION_COUNT};

/// The interpretation of the bits behind an instruction's B operand.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum BOperand {
  /// Unsigned, 9 bits at offset 23.
  B,
  /// Unsigned, 18 bits at offset 14.
  Bx,
  /// Signed, stored as Bx with a bias of 131071.
  SignedBx,
}

/// The operand fields an opcode's encoding uses.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum OperandLayout {
  /// No operands. Only `Operation::Null` and out of range opcodes have this layout.
  None,
  /// `[B:9][C:9, unused][A:8][Op:6]`
  AB,
  /// `[B:9][C:9][A:8][Op:6]`
  ABC,
  /// `[Bx:18][A:8][Op:6]`
  ABx,
  /// `[sBx:18][A:8][Op:6]`
  AsBx,
  /// `[sBx:18][A:8, unused][Op:6]`
  SBx,
}

impl OperandLayout {

  pub fn has_a(&self) -> bool {
    match self {
      OperandLayout::None | OperandLayout::SBx => false,
      _ => true
    }
  }

  pub fn has_c(&self) -> bool {
    *self == OperandLayout::ABC
  }

  /// Which reading of the B bits this layout uses, if any.
  pub fn b_operand(&self) -> Option<BOperand> {
    match self {
      OperandLayout::AB | OperandLayout::ABC => Some(BOperand::B),
      OperandLayout::ABx => Some(BOperand::Bx),
      OperandLayout::AsBx | OperandLayout::SBx => Some(BOperand::SignedBx),
      OperandLayout::None => None
    }
  }

  pub fn has(&self, field: OperandField) -> bool {
    match field {
      OperandField::A => self.has_a(),
      OperandField::B => self.b_operand().is_some(),
      OperandField::C => self.has_c(),
    }
  }

  /// True if no operand can be decoded under this layout.
  pub fn is_empty(&self) -> bool {
    *self == OperandLayout::None
  }

}

impl Display for OperandLayout {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      OperandLayout::None => "none",
      OperandLayout::AB   => "A B",
      OperandLayout::ABC  => "A B C",
      OperandLayout::ABx  => "A Bx",
      OperandLayout::AsBx => "A sBx",
      OperandLayout::SBx  => "sBx",
    };
    write!(f, "{}", name)
  }
}

// Every opcode appears in exactly one group. Anything left out keeps `OperandLayout::None`.
const LAYOUT_GROUPS: &[(OperandLayout, &[Operation])] = &[
  (
    OperandLayout::AB,
    &[
      Operation::Move,    Operation::LoadNil, Operation::GetUpval, Operation::SetUpval,
      Operation::Unm,     Operation::Not,     Operation::Len,      Operation::TailCall,
      Operation::Close,   Operation::VarArg,
    ]
  ),
  (
    OperandLayout::ABC,
    &[
      Operation::LoadBool, Operation::GetTable, Operation::SetTable, Operation::NewTable,
      Operation::SelfOp,   Operation::Add,      Operation::Sub,      Operation::Mul,
      Operation::Div,      Operation::Mod,      Operation::Pow,      Operation::Concat,
      Operation::Eq,       Operation::Lt,       Operation::Le,       Operation::Test,
      Operation::TestSet,  Operation::Call,     Operation::Return,   Operation::TForLoop,
      Operation::SetList,
    ]
  ),
  (
    OperandLayout::ABx,
    &[Operation::LoadK, Operation::GetGlobal, Operation::SetGlobal, Operation::Closure]
  ),
  (OperandLayout::AsBx, &[Operation::ForLoop, Operation::ForPrep]),
  (OperandLayout::SBx,  &[Operation::Jmp]),
];

lazy_static! {
  /// Opcode layouts indexed by opcode field value.
  static ref LAYOUTS: [OperandLayout; OPERATION_COUNT + 1] = {
    let mut table = [OperandLayout::None; OPERATION_COUNT + 1];
    for (layout, operations) in LAYOUT_GROUPS {
      for operation in operations.iter() {
        table[operation.code() as usize] = *layout;
      }
    }
    table
  };
}

/// Looks up the layout for an opcode field value. Values past the table have no operands.
pub(crate) fn layout_of(code: u8) -> OperandLayout {
  match LAYOUTS.get(code as usize) {
    Some(layout) => *layout,
    None => OperandLayout::None
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use strum::IntoEnumIterator;

  #[test]
  fn every_operation_has_operands() {
    for operation in Operation::iter().filter(|o| !o.is_null()) {
      assert!(!operation.layout().is_empty(), "{} has no layout", operation);
    }
    assert!(Operation::Null.layout().is_empty());
  }

  #[test]
  fn groups_are_disjoint() {
    let mut seen = vec![0; OPERATION_COUNT + 1];
    for (_, operations) in LAYOUT_GROUPS {
      for operation in operations.iter() {
        seen[operation.code() as usize] += 1;
      }
    }
    assert!(seen[..OPERATION_COUNT].iter().all(|&count| count == 1));
    assert_eq!(seen[OPERATION_COUNT], 0);
  }

  #[test]
  fn known_layouts() {
    assert_eq!(Operation::Move.layout(),     OperandLayout::AB);
    assert_eq!(Operation::LoadK.layout(),    OperandLayout::ABx);
    assert_eq!(Operation::LoadBool.layout(), OperandLayout::ABC);
    assert_eq!(Operation::Concat.layout(),   OperandLayout::ABC);
    assert_eq!(Operation::Jmp.layout(),      OperandLayout::SBx);
    assert_eq!(Operation::TailCall.layout(), OperandLayout::AB);
    assert_eq!(Operation::Return.layout(),   OperandLayout::ABC);
    assert_eq!(Operation::ForPrep.layout(),  OperandLayout::AsBx);
    assert_eq!(Operation::Closure.layout(),  OperandLayout::ABx);
    assert_eq!(Operation::VarArg.layout(),   OperandLayout::AB);
  }

  #[test]
  fn out_of_range_codes_have_no_operands() {
    for code in (OPERATION_COUNT as u8)..=u8::MAX {
      assert!(layout_of(code).is_empty());
    }
  }

  #[test]
  fn field_membership() {
    assert!(OperandLayout::SBx.has(OperandField::B));
    assert!(!OperandLayout::SBx.has(OperandField::A));
    assert!(!OperandLayout::AB.has(OperandField::C));
    assert!(OperandLayout::ABC.has(OperandField::C));
    assert_eq!(OperandLayout::ABx.b_operand(), Some(BOperand::Bx));
    assert_eq!(OperandLayout::None.b_operand(), None);
  }

}
