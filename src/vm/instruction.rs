use super::error::ExecError;
use super::operand::Operands;
use super::registers::Register;
use crate::device::{FanSpeed, Mode, Switch};
use crate::environment::Sensor;
use std::fmt;

/// A loaded instruction: uppercased opcode plus raw operand strings.
///
/// Operands are not interpreted at load time; [`Instruction::decode`] does
/// that when the instruction is about to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: String,
    pub operands: Vec<String>,
    /// 1-based source line the instruction came from
    pub line: usize,
}

/// Register-to-register arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    pub fn holds(self, left: i64, right: i64) -> bool {
        match self {
            Comparison::Eq => left == right,
            Comparison::Ne => left != right,
            Comparison::Lt => left < right,
            Comparison::Le => left <= right,
            Comparison::Gt => left > right,
            Comparison::Ge => left >= right,
        }
    }
}

/// Which operand order a `LOAD` was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrder {
    /// `LOAD Tn, var`
    RegisterFirst,
    /// `LOAD var, Tn`
    VariableFirst,
}

/// A decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    // Register / variable ops
    LoadImm { reg: Register, value: i64 },
    Store { var: String, reg: Register },
    Load { reg: Register, var: String, order: LoadOrder },
    // Arithmetic
    Arith { op: ArithmeticOp, rd: Register, r1: Register, r2: Register },
    Inc(Register),
    Dec(Register),
    Neg { rd: Register, r1: Register },
    // Comparisons (write rd and the latch)
    Cmp { cmp: Comparison, rd: Register, r1: Register, r2: Register },
    // Control flow
    Jz(String),
    Jnz(String),
    Jmp(String),
    // Sensors / time
    ReadSensor { reg: Register, sensor: Sensor },
    Wait(Register),
    // Device control
    Power(Switch),
    SetMode(Mode),
    SetTemp(Register),
    SetFan(FanSpeed),
    SetSwing(Switch),
    // Misc
    Print,
    Halt,
}

impl Instruction {
    pub fn new(opcode: &str, operands: Vec<String>, line: usize) -> Self {
        Instruction {
            opcode: opcode.to_uppercase(),
            operands,
            line,
        }
    }

    /// Interpret the opcode and operands
    pub fn decode(&self) -> Result<Op, ExecError> {
        let ops = Operands::new(self);
        let arith = |op: ArithmeticOp| -> Result<Op, ExecError> {
            let (rd, r1, r2) = ops.three_registers()?;
            Ok(Op::Arith { op, rd, r1, r2 })
        };
        let cmp = |kind: Comparison| -> Result<Op, ExecError> {
            let (rd, r1, r2) = ops.three_registers()?;
            Ok(Op::Cmp { cmp: kind, rd, r1, r2 })
        };

        match self.opcode.as_str() {
            "LOAD_IMM" => Ok(Op::LoadImm {
                reg: ops.register(0)?,
                value: ops.integer(1)?,
            }),
            "STORE" => Ok(Op::Store {
                var: ops.raw(0)?.to_string(),
                reg: ops.register(1)?,
            }),
            "LOAD" => {
                let (first, second) = (ops.raw(0)?, ops.raw(1)?);
                if Register::has_register_shape(first) {
                    Ok(Op::Load {
                        reg: first.parse()?,
                        var: second.to_string(),
                        order: LoadOrder::RegisterFirst,
                    })
                } else {
                    Ok(Op::Load {
                        reg: second.parse()?,
                        var: first.to_string(),
                        order: LoadOrder::VariableFirst,
                    })
                }
            }
            "ADD" => arith(ArithmeticOp::Add),
            "SUB" => arith(ArithmeticOp::Sub),
            "MUL" => arith(ArithmeticOp::Mul),
            "DIV" => arith(ArithmeticOp::Div),
            "INC" => Ok(Op::Inc(ops.register(0)?)),
            "DEC" => Ok(Op::Dec(ops.register(0)?)),
            "NEG" => Ok(Op::Neg {
                rd: ops.register(0)?,
                r1: ops.register(1)?,
            }),
            "CMP_EQ" => cmp(Comparison::Eq),
            "CMP_NE" => cmp(Comparison::Ne),
            "CMP_LT" => cmp(Comparison::Lt),
            "CMP_LE" => cmp(Comparison::Le),
            "CMP_GT" => cmp(Comparison::Gt),
            "CMP_GE" => cmp(Comparison::Ge),
            "JZ" => Ok(Op::Jz(ops.label(0)?)),
            "JNZ" => Ok(Op::Jnz(ops.label(0)?)),
            "JMP" => Ok(Op::Jmp(ops.label(0)?)),
            "READ_SENSOR" => Ok(Op::ReadSensor {
                reg: ops.register(0)?,
                sensor: ops.raw(1)?.parse()?,
            }),
            "WAIT" => Ok(Op::Wait(ops.register(0)?)),
            "POWER" => Ok(Op::Power(Switch::from_operand(ops.raw(0)?))),
            "SET_MODE" => Ok(Op::SetMode(ops.raw(0)?.parse()?)),
            "SET_TEMP" => Ok(Op::SetTemp(ops.register(0)?)),
            "SET_FAN" => Ok(Op::SetFan(ops.raw(0)?.parse()?)),
            "SET_SWING" => Ok(Op::SetSwing(Switch::from_operand(ops.raw(0)?))),
            "PRINT" => Ok(Op::Print),
            "HALT" => Ok(Op::Halt),
            other => Err(ExecError::UnknownOpcode(other.to_string())),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::LoadImm { reg, value } => write!(f, "LOAD_IMM {}, {}", reg, value),
            Op::Store { var, reg } => write!(f, "STORE {}, {}", var, reg),
            Op::Load { reg, var, order: LoadOrder::RegisterFirst } => {
                write!(f, "LOAD {}, {}", reg, var)
            }
            Op::Load { reg, var, order: LoadOrder::VariableFirst } => {
                write!(f, "LOAD {}, {}", var, reg)
            }
            Op::Arith { op, rd, r1, r2 } => {
                let name = match op {
                    ArithmeticOp::Add => "ADD",
                    ArithmeticOp::Sub => "SUB",
                    ArithmeticOp::Mul => "MUL",
                    ArithmeticOp::Div => "DIV",
                };
                write!(f, "{} {}, {}, {}", name, rd, r1, r2)
            }
            Op::Inc(reg) => write!(f, "INC {}", reg),
            Op::Dec(reg) => write!(f, "DEC {}", reg),
            Op::Neg { rd, r1 } => write!(f, "NEG {}, {}", rd, r1),
            Op::Cmp { cmp, rd, r1, r2 } => {
                let name = match cmp {
                    Comparison::Eq => "CMP_EQ",
                    Comparison::Ne => "CMP_NE",
                    Comparison::Lt => "CMP_LT",
                    Comparison::Le => "CMP_LE",
                    Comparison::Gt => "CMP_GT",
                    Comparison::Ge => "CMP_GE",
                };
                write!(f, "{} {}, {}, {}", name, rd, r1, r2)
            }
            Op::Jz(label) => write!(f, "JZ {}", label),
            Op::Jnz(label) => write!(f, "JNZ {}", label),
            Op::Jmp(label) => write!(f, "JMP {}", label),
            Op::ReadSensor { reg, sensor } => write!(f, "READ_SENSOR {}, {}", reg, sensor),
            Op::Wait(reg) => write!(f, "WAIT {}", reg),
            Op::Power(state) => write!(f, "POWER {}", state),
            Op::SetMode(mode) => write!(f, "SET_MODE {}", mode),
            Op::SetTemp(reg) => write!(f, "SET_TEMP {}", reg),
            Op::SetFan(speed) => write!(f, "SET_FAN {}", speed),
            Op::SetSwing(state) => write!(f, "SET_SWING {}", state),
            Op::Print => f.write_str("PRINT"),
            Op::Halt => f.write_str("HALT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(opcode: &str, operands: &[&str]) -> Result<Op, ExecError> {
        Instruction::new(opcode, operands.iter().map(|s| s.to_string()).collect(), 1).decode()
    }

    #[test]
    fn test_load_accepts_both_operand_orders() {
        let reg_first = decode("LOAD", &["T3", "setpoint"]).unwrap();
        let var_first = decode("LOAD", &["setpoint", "T3"]).unwrap();
        for op in [&reg_first, &var_first] {
            match op {
                Op::Load { reg, var, .. } => {
                    assert_eq!(*reg, Register::T3);
                    assert_eq!(var, "setpoint");
                }
                other => panic!("Expected Load, got {:?}", other),
            }
        }
        assert_eq!(reg_first.to_string(), "LOAD T3, setpoint");
        assert_eq!(var_first.to_string(), "LOAD setpoint, T3");
    }

    #[test]
    fn test_load_with_out_of_range_register_shape() {
        assert_eq!(
            decode("LOAD", &["T12", "x"]),
            Err(ExecError::InvalidRegister("T12".to_string()))
        );
    }

    #[test]
    fn test_decode_keyword_operands() {
        assert_eq!(decode("SET_MODE", &["dry"]).unwrap(), Op::SetMode(Mode::Dry));
        assert_eq!(decode("SET_FAN", &["high"]).unwrap(), Op::SetFan(FanSpeed::High));
        assert_eq!(decode("POWER", &["on"]).unwrap(), Op::Power(Switch::On));
        assert_eq!(
            decode("READ_SENSOR", &["T0", "humidity"]).unwrap(),
            Op::ReadSensor {
                reg: Register::T0,
                sensor: Sensor::Humidity
            }
        );
        assert!(matches!(
            decode("SET_MODE", &["boost"]),
            Err(ExecError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(
            decode("FLY", &[]),
            Err(ExecError::UnknownOpcode("FLY".to_string()))
        );
    }

    #[test]
    fn test_opcode_is_uppercased() {
        let instr = Instruction::new("cmp_gt", vec!["T2".into(), "T0".into(), "T1".into()], 4);
        assert_eq!(instr.opcode, "CMP_GT");
        assert_eq!(instr.decode().unwrap().to_string(), "CMP_GT T2, T0, T1");
    }

    #[test]
    fn test_comparison_table() {
        assert!(Comparison::Eq.holds(3, 3));
        assert!(Comparison::Ne.holds(3, 4));
        assert!(Comparison::Lt.holds(-1, 0));
        assert!(Comparison::Le.holds(0, 0));
        assert!(Comparison::Gt.holds(28, 25));
        assert!(!Comparison::Ge.holds(24, 25));
    }
}
