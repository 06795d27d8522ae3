// Sensor access and simulated time: READ_SENSOR, WAIT

use crate::environment::Sensor;
use crate::vm::error::ExecError;
use crate::vm::registers::Register;
use crate::vm::state::VmState;
use log::warn;

pub fn read_sensor(state: &mut VmState, reg: Register, sensor: Sensor) -> Result<(), ExecError> {
    let value = state.sensors.get(sensor);
    state.registers.set(reg, value);
    state.advance_pc();
    Ok(())
}

/// Advance the clock by the register's value, wrapping around midnight.
/// A negative amount winds the clock back but adds no ticks.
pub fn wait(state: &mut VmState, reg: Register) -> Result<(), ExecError> {
    let seconds = state.registers.get(reg);
    if seconds < 0 {
        warn!(target: "vm", "WAIT {} of {} seconds moves TIME backwards", reg, seconds);
    }
    state.sensors.advance_time(seconds);
    state.ticks = state.ticks.saturating_add(seconds.max(0) as u64);
    crate::debug_instructions!("Wait: {}s, TIME now {}", seconds, state.sensors.time);
    state.advance_pc();
    Ok(())
}
