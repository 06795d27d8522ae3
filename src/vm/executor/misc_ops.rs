use crate::vm::error::ExecError;
use crate::vm::state::{VmEvent, VmState};

/// Queue a snapshot for the caller to present
pub fn print(state: &mut VmState) -> Result<(), ExecError> {
    let snapshot = state.snapshot();
    state.events.push_back(VmEvent::Print(snapshot));
    state.advance_pc();
    Ok(())
}

/// Stop execution; `pc` stays on the HALT instruction
pub fn halt(state: &mut VmState) -> Result<(), ExecError> {
    crate::debug_vm!("Halted after {} steps, {} ticks", state.steps, state.ticks);
    state.halted = true;
    state.events.push_back(VmEvent::Halted {
        steps: state.steps,
        ticks: state.ticks,
    });
    Ok(())
}
