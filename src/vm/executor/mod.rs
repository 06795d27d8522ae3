// VM Instruction execution: dispatches decoded instructions to their handlers

pub mod arithmetic_ops;
pub mod comparison_ops;
pub mod control_flow_ops;
pub mod device_ops;
pub mod misc_ops;
pub mod register_ops;
pub mod sensor_ops;

use crate::vm::error::ExecError;
use crate::vm::instruction::Op;
use crate::vm::state::VmState;
use std::collections::HashMap;

/// Label name to instruction index
pub type Labels = HashMap<String, usize>;

/// Execute one decoded instruction against `state`.
///
/// Every handler leaves exactly one of these behind: `pc` advanced by one,
/// `pc` set to a jump target, or `halted` set. A failing handler changes
/// neither registers nor `pc`.
pub fn execute(state: &mut VmState, labels: &Labels, op: &Op) -> Result<(), ExecError> {
    match op {
        Op::LoadImm { reg, value } => register_ops::load_imm(state, *reg, *value),
        Op::Store { var, reg } => register_ops::store(state, var, *reg),
        Op::Load { reg, var, .. } => register_ops::load(state, *reg, var),
        Op::Arith { op, rd, r1, r2 } => arithmetic_ops::binary(state, *op, *rd, *r1, *r2),
        Op::Inc(reg) => arithmetic_ops::inc(state, *reg),
        Op::Dec(reg) => arithmetic_ops::dec(state, *reg),
        Op::Neg { rd, r1 } => arithmetic_ops::neg(state, *rd, *r1),
        Op::Cmp { cmp, rd, r1, r2 } => comparison_ops::compare(state, *cmp, *rd, *r1, *r2),
        Op::Jz(label) => {
            let taken = state.last_cmp == 0;
            control_flow_ops::jump_if(state, labels, label, taken)
        }
        Op::Jnz(label) => {
            let taken = state.last_cmp != 0;
            control_flow_ops::jump_if(state, labels, label, taken)
        }
        Op::Jmp(label) => control_flow_ops::jump(state, labels, label),
        Op::ReadSensor { reg, sensor } => sensor_ops::read_sensor(state, *reg, *sensor),
        Op::Wait(reg) => sensor_ops::wait(state, *reg),
        Op::Power(switch) => device_ops::power(state, *switch),
        Op::SetMode(mode) => device_ops::set_mode(state, *mode),
        Op::SetTemp(reg) => device_ops::set_temp(state, *reg),
        Op::SetFan(speed) => device_ops::set_fan(state, *speed),
        Op::SetSwing(switch) => device_ops::set_swing(state, *switch),
        Op::Print => misc_ops::print(state),
        Op::Halt => misc_ops::halt(state),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::vm::instruction::Instruction;

    /// Decode a single line of assembly and execute it
    pub(crate) fn exec_line(
        state: &mut VmState,
        labels: &Labels,
        line: &str,
    ) -> Result<(), ExecError> {
        let mut tokens = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty());
        let opcode = tokens.next().unwrap();
        let instr = Instruction::new(opcode, tokens.map(str::to_string).collect(), 1);
        execute(state, labels, &instr.decode()?)
    }

    pub(crate) fn no_labels() -> Labels {
        Labels::new()
    }
}
