//! A disassembly listing: a block of code words decoded one by one and displayed as a table.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use crate::bytecode::{decode_words, Instruction, Word};

pub struct Listing {
  instructions: Vec<Instruction>,
}

impl Listing {

  pub fn new(words: &[Word]) -> Listing {
    let instructions = decode_words(words);

    #[cfg(feature = "trace_decoding")]
    for (i, instruction) in instructions.iter().enumerate() {
      println!("[{:>4}] {:08X} => {}", i, instruction.word(), instruction);
    }

    Listing { instructions }
  }

  pub fn from_instructions(instructions: Vec<Instruction>) -> Listing {
    Listing { instructions }
  }

  pub fn instructions(&self) -> &[Instruction] {
    &self.instructions
  }

  pub fn len(&self) -> usize {
    self.instructions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.instructions.is_empty()
  }

  /// The words whose opcode field names no operation, with their positions.
  pub fn unrecognized(&self) -> impl Iterator<Item = (usize, &Instruction)> + '_ {
    self.instructions
        .iter()
        .enumerate()
        .filter(|(_, instruction)| instruction.opcode().is_null())
  }

  pub fn to_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(
      row![ubr->"Index", ubl->"Word", ubl->"Opcode", ubr->"A", ubr->"B", ubr->"C"]
    );

    for (i, instruction) in self.instructions.iter().enumerate() {
      let decoded = instruction.decode();
      table.add_row(
        row![
          r->i,
          format!("{:08X}", instruction.word()),
          decoded.opcode,
          r->decoded.a,
          r->decoded.b,
          r->decoded.c
        ]
      );
    }
    table
  }

}

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Listing {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.to_table())
  }
}
