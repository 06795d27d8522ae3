// Integer arithmetic between registers: ADD, SUB, MUL, DIV, INC, DEC, NEG

use crate::vm::error::ExecError;
use crate::vm::instruction::ArithmeticOp;
use crate::vm::registers::Register;
use crate::vm::state::VmState;

/// Division rounding toward negative infinity
pub fn floor_div(a: i64, b: i64) -> Result<i64, ExecError> {
    if b == 0 {
        return Err(ExecError::DivisionByZero);
    }
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

pub fn binary(
    state: &mut VmState,
    op: ArithmeticOp,
    rd: Register,
    r1: Register,
    r2: Register,
) -> Result<(), ExecError> {
    let a = state.registers.get(r1);
    let b = state.registers.get(r2);
    let result = match op {
        ArithmeticOp::Add => a.wrapping_add(b),
        ArithmeticOp::Sub => a.wrapping_sub(b),
        ArithmeticOp::Mul => a.wrapping_mul(b),
        ArithmeticOp::Div => floor_div(a, b)?,
    };
    crate::debug_instructions!("{:?}: {} = {} op {} -> {}", op, rd, a, b, result);
    state.registers.set(rd, result);
    state.advance_pc();
    Ok(())
}

pub fn inc(state: &mut VmState, reg: Register) -> Result<(), ExecError> {
    let value = state.registers.get(reg).wrapping_add(1);
    state.registers.set(reg, value);
    state.advance_pc();
    Ok(())
}

pub fn dec(state: &mut VmState, reg: Register) -> Result<(), ExecError> {
    let value = state.registers.get(reg).wrapping_sub(1);
    state.registers.set(reg, value);
    state.advance_pc();
    Ok(())
}

pub fn neg(state: &mut VmState, rd: Register, r1: Register) -> Result<(), ExecError> {
    let value = state.registers.get(r1).wrapping_neg();
    state.registers.set(rd, value);
    state.advance_pc();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::executor::test_support::{exec_line, no_labels};

    fn setup(values: &[(Register, i64)]) -> VmState {
        let mut vm = VmState::new();
        for &(reg, value) in values {
            vm.registers.set(reg, value);
        }
        vm
    }

    #[test]
    fn test_add_sub_mul() {
        let mut vm = setup(&[(Register::T0, 5), (Register::T1, 26)]);
        let labels = no_labels();
        exec_line(&mut vm, &labels, "ADD T2, T0, T1").unwrap();
        exec_line(&mut vm, &labels, "SUB T3, T0, T1").unwrap();
        exec_line(&mut vm, &labels, "MUL T4, T0, T1").unwrap();
        assert_eq!(vm.registers.get(Register::T2), 31);
        assert_eq!(vm.registers.get(Register::T3), -21);
        assert_eq!(vm.registers.get(Register::T4), 130);
        assert_eq!(vm.pc, 3);
    }

    #[test]
    fn test_destination_may_alias_source() {
        let mut vm = setup(&[(Register::T0, 5), (Register::T1, 26)]);
        exec_line(&mut vm, &no_labels(), "SUB T1, T1, T0").unwrap();
        assert_eq!(vm.registers.get(Register::T1), 21);
    }

    #[test]
    fn test_div_floors() {
        assert_eq!(floor_div(7, 2).unwrap(), 3);
        assert_eq!(floor_div(-7, 2).unwrap(), -4);
        assert_eq!(floor_div(7, -2).unwrap(), -4);
        assert_eq!(floor_div(-7, -2).unwrap(), 3);
        assert_eq!(floor_div(-8, 2).unwrap(), -4);
        assert_eq!(floor_div(i64::MIN, -1).unwrap(), i64::MIN);
    }

    #[test]
    fn test_div_by_zero_leaves_state_untouched() {
        let mut vm = setup(&[(Register::T0, 10), (Register::T1, 0), (Register::T2, 7)]);
        let err = exec_line(&mut vm, &no_labels(), "DIV T2, T0, T1").unwrap_err();
        assert_eq!(err, ExecError::DivisionByZero);
        assert_eq!(vm.registers.get(Register::T2), 7);
        assert_eq!(vm.pc, 0);
    }

    #[test]
    fn test_inc_dec_neg() {
        let mut vm = setup(&[(Register::T0, 3)]);
        let labels = no_labels();
        exec_line(&mut vm, &labels, "INC T0").unwrap();
        exec_line(&mut vm, &labels, "INC T0").unwrap();
        exec_line(&mut vm, &labels, "DEC T0").unwrap();
        exec_line(&mut vm, &labels, "NEG T1, T0").unwrap();
        assert_eq!(vm.registers.get(Register::T0), 4);
        assert_eq!(vm.registers.get(Register::T1), -4);
        assert_eq!(vm.pc, 4);
    }

    #[test]
    fn test_unknown_register_is_rejected() {
        let mut vm = VmState::new();
        let err = exec_line(&mut vm, &no_labels(), "ADD T0, T1, R2").unwrap_err();
        assert_eq!(err, ExecError::InvalidRegister("R2".to_string()));
    }
}
