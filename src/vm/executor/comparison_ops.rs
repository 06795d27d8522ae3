// Comparisons: write 1/0 into the destination register and the latch

use crate::vm::error::ExecError;
use crate::vm::instruction::Comparison;
use crate::vm::registers::Register;
use crate::vm::state::VmState;

pub fn compare(
    state: &mut VmState,
    cmp: Comparison,
    rd: Register,
    r1: Register,
    r2: Register,
) -> Result<(), ExecError> {
    let left = state.registers.get(r1);
    let right = state.registers.get(r2);
    let result = i64::from(cmp.holds(left, right));
    crate::debug_instructions!("{:?}: {} vs {} -> {}", cmp, left, right, result);
    state.registers.set(rd, result);
    state.last_cmp = result;
    state.advance_pc();
    Ok(())
}
