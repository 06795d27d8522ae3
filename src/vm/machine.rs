//! The air-conditioner VM: loaded program plus the state it drives.

use super::error::{ExecError, ParseError};
use super::executor::{self, Labels};
use super::instruction::Instruction;
use super::parser::{self, ParsedProgram};
use super::state::{Snapshot, VmEvent, VmState};
use crate::environment::{self, Sensor};
use log::debug;

#[derive(Debug, Clone, Default)]
pub struct AirConditionerVm {
    state: VmState,
    program: Vec<Instruction>,
    labels: Labels,
}

impl AirConditionerVm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the program and labels and rewind the cursor.
    ///
    /// Registers, variables, sensors and device state are kept, so control
    /// logic can be swapped mid-simulation. Events not yet drained are
    /// discarded. On failure the VM is left with an empty program.
    pub fn load(&mut self, source: &str) -> Result<(), ParseError> {
        self.program.clear();
        self.labels.clear();
        self.state.reset_cursor();

        let ParsedProgram {
            instructions,
            labels,
        } = parser::parse_assembly(source)?;
        crate::debug_vm!(
            "Loaded program: {} instructions, {} labels",
            instructions.len(),
            labels.len()
        );
        self.program = instructions;
        self.labels = labels;
        Ok(())
    }

    /// Execute one instruction, or halt if the program is exhausted.
    ///
    /// The environment model runs before the instruction, including on the
    /// instruction that halts or fails.
    pub fn step(&mut self) -> Result<(), ExecError> {
        let state = &mut self.state;
        if state.halted {
            return Ok(());
        }
        let Some(instr) = self.program.get(state.pc) else {
            crate::debug_vm!("Program exhausted at pc {}", state.pc);
            state.halted = true;
            return Ok(());
        };

        state.steps += 1;
        state.ticks += 1;
        environment::update(&mut state.sensors, &state.device);

        let result = instr
            .decode()
            .and_then(|op| {
                crate::debug_instructions!([state.steps, state.pc] "{}", op);
                executor::execute(state, &self.labels, &op)
            });
        if let Err(ref err) = result {
            debug!(
                target: "vm",
                "Fault at pc {} (line {}): {}",
                state.pc, instr.line, err
            );
        }
        result
    }

    /// Step until halted.
    ///
    /// With `max_steps`, fails with `StepLimitExceeded` instead of executing
    /// an instruction that would push `steps` past the limit.
    pub fn run(&mut self, max_steps: Option<u64>) -> Result<(), ExecError> {
        while !self.state.halted {
            if let Some(limit) = max_steps {
                let has_work = self.state.pc < self.program.len();
                if has_work && self.state.steps >= limit {
                    return Err(ExecError::StepLimitExceeded { limit });
                }
            }
            self.step()?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Back to construction-time registers, variables, environment and cursor.
    /// The loaded program stays.
    pub fn reset(&mut self) {
        self.state = VmState::new();
    }

    /// Override a sensor reading directly, bypassing program logic
    pub fn set_sensor(&mut self, name: &str, value: i64) -> Result<(), ExecError> {
        let sensor: Sensor = name.parse()?;
        self.state.sensors.set(sensor, value);
        Ok(())
    }

    /// Take every event queued by PRINT and HALT since the last drain
    pub fn drain_events(&mut self) -> Vec<VmEvent> {
        self.state.events.drain(..).collect()
    }

    pub fn state(&self) -> &VmState {
        &self.state
    }

    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }
}
