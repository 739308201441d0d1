/*!
  The human readable textual form of bytecode is called assembly. This module reads back the form
  `Instruction` displays as, one instruction per line:

  ```text
  LOADK    (0, 1, 0)   ; comment
  FORLOOP  (3, -10)
  RETURN   (0, 1)
  ```

  Trailing operands may be left off and default to zero. Mnemonics are case insensitive. Unlike
  the `Instruction` setters, which silently drop what does not fit, assembly is validated: an
  operand that is out of range, or non-zero for a field the opcode does not have, is reported
  rather than encoded.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::{
  character::complete::{alpha1, alphanumeric0, char as one_char, digit1, space0},
  combinator::{all_consuming, map, map_res, opt, recognize, rest},
  multi::separated_list0,
  sequence::{delimited, pair, preceded, terminated},
  IResult
};

use super::{BOperand, Instruction, Operand, OperandField, Operation, MAXARG_A, MAXARG_B,
            MAXARG_BX, MAXARG_C, MAX_SBX, MIN_SBX};

/// The most operands any instruction takes.
const MAX_OPERANDS: usize = 3;

pub enum ParsedAssemblySyntax<'a> {
  Instruction(Instruction),
  NotAnOperation{
    line: u32,
    name: &'a str
  },
  WrongArity{
    line: u32,
    operation: Operation,
    args: Vec<i64>
  },
  AbsentOperand{
    line: u32,
    operation: Operation,
    field: OperandField,
    value: i64
  },
  OperandOutOfRange{
    line: u32,
    operation: Operation,
    field: OperandField,
    value: i64
  }
}
// Abbreviated name internally
use ParsedAssemblySyntax as Syntax;

impl<'a> Display for ParsedAssemblySyntax<'a>{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self{
      Syntax::Instruction(i) => {
        write!(f, "{}", i)
      }
      Syntax::NotAnOperation {line, name} => {
        write!(f, "Error on line {}: {} is not an operation.", line, name)
      }
      Syntax::WrongArity{line, operation, args} => {
        write!(f,
          "Error on line {}: {} takes at most {} operands but was given {}: ({})",
          line, operation, MAX_OPERANDS, args.len(),
          args.iter()
              .map(i64::to_string)
              .collect::<Vec<String>>()
              .join(", ")
        )
      }
      Syntax::AbsentOperand{line, operation, field, value} => {
        write!(f,
          "Error on line {}: {} has no {} operand but was given {}.",
          line, operation, field, value
        )
      }
      Syntax::OperandOutOfRange{line, operation, field, value} => {
        write!(f,
          "Error on line {}: {} does not fit in the {} operand of {}.",
          line, value, field, operation
        )
      }
    }
  }
}

fn mnemonic(input: &str) -> IResult<&str, &str> {
  recognize(pair(alpha1, alphanumeric0))(input)
}

fn operand(input: &str) -> IResult<&str, i64> {
  map_res(
    recognize(pair(opt(one_char('-')), digit1)),
    |out: &str| out.parse::<i64>()
  )(input)
}

fn operand_list(input: &str) -> IResult<&str, Vec<i64>> {
  delimited(
    terminated(one_char('('), space0),
    separated_list0(delimited(space0, one_char(','), space0), operand),
    preceded(space0, one_char(')'))
  )(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
  recognize(pair(one_char(';'), rest))(input)
}

/// `MNEMONIC (a, b, c) ; comment`, with the operand list and comment optional.
fn instruction_line(input: &str) -> IResult<&str, (&str, Vec<i64>)> {
  all_consuming(
    delimited(
      space0,
      pair(
        mnemonic,
        map(opt(preceded(space0, operand_list)), Option::unwrap_or_default)
      ),
      pair(space0, opt(comment))
    )
  )(input)
}

fn is_blank(line: &str) -> bool {
  let line = line.trim();
  line.is_empty() || line.starts_with(';')
}

/// The valid range of `field` under `operation`'s layout, or `None` if the layout lacks it.
fn operand_range(operation: Operation, field: OperandField) -> Option<(Operand, Operand)> {
  let layout = operation.layout();
  match field {
    OperandField::A if layout.has_a() => Some((0, MAXARG_A)),
    OperandField::C if layout.has_c() => Some((0, MAXARG_C)),
    OperandField::B => match layout.b_operand() {
      Some(BOperand::B)        => Some((0, MAXARG_B)),
      Some(BOperand::Bx)       => Some((0, MAXARG_BX)),
      Some(BOperand::SignedBx) => Some((MIN_SBX, MAX_SBX)),
      None                     => None
    },
    _ => None
  }
}

fn assemble_line<'a>(line: u32, name: &'a str, args: Vec<i64>) -> Syntax<'a> {
  let operation = match Operation::from_str(name) {
    Ok(operation) if !operation.is_null() => operation,
    _e => return Syntax::NotAnOperation { line, name }
  };

  if args.len() > MAX_OPERANDS {
    return Syntax::WrongArity { line, operation, args };
  }

  let mut operands = [0 as Operand; MAX_OPERANDS];
  let fields = [OperandField::A, OperandField::B, OperandField::C];
  for (i, (&field, &value)) in fields.iter().zip(args.iter()).enumerate() {
    match operand_range(operation, field) {
      Some((low, high)) if value >= low as i64 && value <= high as i64 => {
        operands[i] = value as Operand;
      }
      Some(_) => {
        return Syntax::OperandOutOfRange { line, operation, field, value };
      }
      None if value != 0 => {
        return Syntax::AbsentOperand { line, operation, field, value };
      }
      None => {}
    }
  }

  Syntax::Instruction(Instruction::encode(operation, operands[0], operands[1], operands[2]))
}

/**
  Parses assembly text. Each non-blank line yields one `ParsedAssemblySyntax`, which is either an
  instruction or a description of what is wrong with the line. A line that is not shaped like an
  instruction at all stops parsing with the `nom` error.
*/
pub fn parse_assembly(text: &str) -> Result<Vec<Syntax<'_>>, nom::Err<nom::error::Error<&str>>> {
  let mut syntax_vec = Vec::new();

  for (i, line) in text.lines().enumerate() {
    if is_blank(line) {
      continue;
    }
    let (_rest, (name, args)) = instruction_line(line)?;
    syntax_vec.push(assemble_line(i as u32 + 1, name, args));
  }

  Ok(syntax_vec)
}
