// Operand interpretation: turns the raw operand strings of an instruction into
// registers, integer literals and keyword values at decode time.

use super::error::ExecError;
use super::instruction::Instruction;
use super::registers::Register;

/// Positional view over an instruction's raw operands
pub(crate) struct Operands<'a> {
    instr: &'a Instruction,
}

impl<'a> Operands<'a> {
    pub(crate) fn new(instr: &'a Instruction) -> Self {
        Operands { instr }
    }

    /// Raw operand text at `index`
    pub(crate) fn raw(&self, index: usize) -> Result<&'a str, ExecError> {
        self.instr
            .operands
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| ExecError::MissingOperand {
                opcode: self.instr.opcode.clone(),
                index,
            })
    }

    pub(crate) fn register(&self, index: usize) -> Result<Register, ExecError> {
        self.raw(index)?.parse()
    }

    pub(crate) fn integer(&self, index: usize) -> Result<i64, ExecError> {
        parse_integer(self.raw(index)?)
    }

    /// Three-register form used by arithmetic and comparisons: `rd, r1, r2`
    pub(crate) fn three_registers(&self) -> Result<(Register, Register, Register), ExecError> {
        Ok((self.register(0)?, self.register(1)?, self.register(2)?))
    }

    pub(crate) fn label(&self, index: usize) -> Result<String, ExecError> {
        self.raw(index).map(str::to_string)
    }
}

/// Parse a signed decimal literal, with an optional leading `+`
pub(crate) fn parse_integer(s: &str) -> Result<i64, ExecError> {
    s.parse::<i64>()
        .map_err(|_| ExecError::InvalidInteger(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instr(opcode: &str, operands: &[&str]) -> Instruction {
        Instruction::new(opcode, operands.iter().map(|s| s.to_string()).collect(), 1)
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(parse_integer("42").unwrap(), 42);
        assert_eq!(parse_integer("-7").unwrap(), -7);
        assert_eq!(parse_integer("+3").unwrap(), 3);
        assert_eq!(
            parse_integer("2.5"),
            Err(ExecError::InvalidInteger("2.5".to_string()))
        );
    }

    #[test]
    fn test_missing_operand_reports_position() {
        let i = instr("ADD", &["T0", "T1"]);
        let ops = Operands::new(&i);
        assert_eq!(
            ops.three_registers(),
            Err(ExecError::MissingOperand {
                opcode: "ADD".to_string(),
                index: 2
            })
        );
    }

    #[test]
    fn test_register_and_label_operands() {
        let i = instr("JMP", &["done"]);
        let ops = Operands::new(&i);
        assert_eq!(ops.label(0).unwrap(), "done");
        assert_eq!(
            ops.register(0),
            Err(ExecError::InvalidRegister("done".to_string()))
        );
    }
}
