// VM Register system: the fixed T0..T9 register file and register name parsing

use super::error::ExecError;
use crate::config::REGISTER_COUNT;
use std::fmt;
use std::str::FromStr;

/// Enum for all VM registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    T0,
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
    T9,
}

impl Register {
    pub const ALL: [Register; REGISTER_COUNT] = [
        Register::T0,
        Register::T1,
        Register::T2,
        Register::T3,
        Register::T4,
        Register::T5,
        Register::T6,
        Register::T7,
        Register::T8,
        Register::T9,
    ];

    /// Index for a register in the data array
    fn idx(self) -> usize {
        self as usize
    }

    /// True when `s` has register shape: a `T` followed by one or more digits.
    /// Shape alone does not make it a valid register (`T12` matches).
    pub fn has_register_shape(s: &str) -> bool {
        match s.strip_prefix('T') {
            Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
            None => false,
        }
    }
}

impl FromStr for Register {
    type Err = ExecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Register::*;
        match s {
            "T0" => Ok(T0),
            "T1" => Ok(T1),
            "T2" => Ok(T2),
            "T3" => Ok(T3),
            "T4" => Ok(T4),
            "T5" => Ok(T5),
            "T6" => Ok(T6),
            "T7" => Ok(T7),
            "T8" => Ok(T8),
            "T9" => Ok(T9),
            _ => Err(ExecError::InvalidRegister(s.to_string())),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.idx())
    }
}

/// Storage for all VM registers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    data: [i64; REGISTER_COUNT],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reg: Register) -> i64 {
        self.data[reg.idx()]
    }

    pub fn set(&mut self, reg: Register, value: i64) {
        self.data[reg.idx()] = value;
    }

    /// Registers paired with their current values, in T0..T9 order
    pub fn iter(&self) -> impl Iterator<Item = (Register, i64)> + '_ {
        Register::ALL.into_iter().map(move |r| (r, self.get(r)))
    }

    pub fn clear(&mut self) {
        self.data = [0; REGISTER_COUNT];
    }
}
