// Register and variable transfer: LOAD_IMM, STORE, LOAD

use crate::vm::error::ExecError;
use crate::vm::registers::Register;
use crate::vm::state::VmState;

pub fn load_imm(state: &mut VmState, reg: Register, value: i64) -> Result<(), ExecError> {
    state.registers.set(reg, value);
    state.advance_pc();
    Ok(())
}

pub fn store(state: &mut VmState, var: &str, reg: Register) -> Result<(), ExecError> {
    let value = state.registers.get(reg);
    crate::debug_instructions!("Store: {} = {} (from {})", var, value, reg);
    state.variables.insert(var.to_string(), value);
    state.advance_pc();
    Ok(())
}

/// Copy a variable into a register. Unset variables read as 0.
pub fn load(state: &mut VmState, reg: Register, var: &str) -> Result<(), ExecError> {
    let value = state.variables.get(var).copied().unwrap_or(0);
    state.registers.set(reg, value);
    state.advance_pc();
    Ok(())
}
