// Device control: POWER, SET_MODE, SET_TEMP, SET_FAN, SET_SWING

use crate::device::{FanSpeed, Mode, Switch};
use crate::vm::error::ExecError;
use crate::vm::registers::Register;
use crate::vm::state::VmState;

pub fn power(state: &mut VmState, switch: Switch) -> Result<(), ExecError> {
    crate::debug_instructions!("Power: {}", switch);
    state.device.power = switch;
    state.advance_pc();
    Ok(())
}

pub fn set_mode(state: &mut VmState, mode: Mode) -> Result<(), ExecError> {
    state.device.mode = mode;
    state.advance_pc();
    Ok(())
}

pub fn set_temp(state: &mut VmState, reg: Register) -> Result<(), ExecError> {
    state.device.target_temp = state.registers.get(reg);
    state.advance_pc();
    Ok(())
}

pub fn set_fan(state: &mut VmState, speed: FanSpeed) -> Result<(), ExecError> {
    state.device.fan_speed = speed;
    state.advance_pc();
    Ok(())
}

pub fn set_swing(state: &mut VmState, switch: Switch) -> Result<(), ExecError> {
    state.device.swing = switch;
    state.advance_pc();
    Ok(())
}
