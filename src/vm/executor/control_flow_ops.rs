// Control flow: JMP, JZ, JNZ. Labels are resolved when the jump is taken.

use super::Labels;
use crate::vm::error::ExecError;
use crate::vm::state::VmState;

fn resolve(labels: &Labels, label: &str) -> Result<usize, ExecError> {
    labels
        .get(label)
        .copied()
        .ok_or_else(|| ExecError::UnknownLabel(label.to_string()))
}

pub fn jump(state: &mut VmState, labels: &Labels, label: &str) -> Result<(), ExecError> {
    let target = resolve(labels, label)?;
    crate::debug_instructions!("Jmp: Jumping to {} ({})", label, target);
    state.pc = target;
    Ok(())
}

/// Jump when `taken`, otherwise fall through. An unknown label only fails a taken jump.
pub fn jump_if(
    state: &mut VmState,
    labels: &Labels,
    label: &str,
    taken: bool,
) -> Result<(), ExecError> {
    crate::debug_instructions!(
        "Branch: latch = {}. Jumping to {}? {}",
        state.last_cmp,
        label,
        taken
    );
    if taken {
        state.pc = resolve(labels, label)?;
    } else {
        state.advance_pc();
    }
    Ok(())
}
