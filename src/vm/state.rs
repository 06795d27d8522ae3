// VM State: registers, variables, environment, device block, cursor and counters

use super::registers::Registers;
use crate::device::DeviceState;
use crate::environment::Sensors;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

/// Something the VM hands to its caller instead of printing itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmEvent {
    /// A `PRINT` instruction executed
    Print(Snapshot),
    /// A `HALT` instruction executed
    Halted { steps: u64, ticks: u64 },
}

/// All mutable state of one VM instance
#[derive(Debug, Clone, Default)]
pub struct VmState {
    pub registers: Registers,
    pub variables: HashMap<String, i64>,
    pub sensors: Sensors,
    pub device: DeviceState,
    pub pc: usize, // Program counter; equals program length once exhausted
    pub halted: bool,
    pub last_cmp: i64, // Comparison latch read by JZ/JNZ
    pub steps: u64,
    pub ticks: u64,
    pub events: VecDeque<VmEvent>,
}

impl VmState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_pc(&mut self) {
        self.pc += 1;
    }

    /// Back to the start of the program without touching registers or the environment.
    /// Undrained events from the previous run are dropped.
    pub fn reset_cursor(&mut self) {
        self.pc = 0;
        self.halted = false;
        self.steps = 0;
        self.ticks = 0;
        self.events.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            registers: self.registers.clone(),
            variables: self
                .variables
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            sensors: self.sensors.clone(),
            device: self.device.clone(),
            pc: self.pc,
            halted: self.halted,
            last_cmp: self.last_cmp,
            steps: self.steps,
            ticks: self.ticks,
        }
    }
}

/// Read-only copy of the VM state for external collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub registers: Registers,
    pub variables: BTreeMap<String, i64>,
    pub sensors: Sensors,
    pub device: DeviceState,
    pub pc: usize,
    pub halted: bool,
    pub last_cmp: i64,
    pub steps: u64,
    pub ticks: u64,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self.sensors.time;
        writeln!(f, "=== Air Conditioner State ===")?;
        writeln!(f, "Power: {}", self.device.power)?;
        writeln!(f, "Mode: {}", self.device.mode)?;
        writeln!(f, "Target Temp: {}°C", self.device.target_temp)?;
        writeln!(f, "Current Temp: {}°C", self.sensors.temp)?;
        writeln!(f, "Fan: {}", self.device.fan_speed)?;
        writeln!(f, "Swing: {}", self.device.swing)?;
        writeln!(f, "Humidity: {}%", self.sensors.humidity)?;
        writeln!(
            f,
            "Occupied: {}",
            if self.sensors.occupied != 0 { "YES" } else { "NO" }
        )?;
        writeln!(f, "Time: {:02}:{:02}", time / 3600, (time % 3600) / 60)?;
        write!(f, "============================")
    }
}
