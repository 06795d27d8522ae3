//! Canned control programs, embedded from `demos/`, with the sensor presets
//! each one is meant to run against.

use crate::environment::Sensor;
use crate::vm::error::VmError;
use crate::vm::machine::AirConditionerVm;
use rust_embed::RustEmbed;
use thiserror::Error;

#[derive(RustEmbed)]
#[folder = "demos/"]
struct DemoFiles;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("no demo named '{0}'")]
    Unknown(String),
    #[error("demo program '{0}' is not embedded")]
    Missing(&'static str),
    #[error("demo program '{0}' is not valid UTF-8")]
    NotUtf8(&'static str),
    #[error(transparent)]
    Vm(#[from] VmError),
}

#[derive(Debug, Clone, Copy)]
pub struct Demo {
    pub name: &'static str,
    pub title: &'static str,
    file: &'static str,
    pub sensors: &'static [(Sensor, i64)],
}

pub static DEMOS: [Demo; 5] = [
    Demo {
        name: "basic",
        title: "Basic Temperature Control",
        file: "basic_temp.acasm",
        sensors: &[],
    },
    Demo {
        name: "conditional",
        title: "Conditional Control (Temp = 28°C)",
        file: "conditional.acasm",
        sensors: &[(Sensor::Temp, 28)],
    },
    Demo {
        name: "loop",
        title: "Loop Example",
        file: "loop.acasm",
        sensors: &[],
    },
    Demo {
        name: "presence",
        title: "Presence & Time Control",
        file: "presence_time.acasm",
        sensors: &[(Sensor::Occupied, 1), (Sensor::Time, 79_200)],
    },
    Demo {
        name: "dehumidify",
        title: "Dehumidification (Humidity = 75%)",
        file: "dehumidify.acasm",
        sensors: &[(Sensor::Humidity, 75)],
    },
];

impl Demo {
    pub fn find(name: &str) -> Result<&'static Demo, DemoError> {
        DEMOS
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DemoError::Unknown(name.to_string()))
    }

    /// Assembly source of the demo
    pub fn source(&self) -> Result<String, DemoError> {
        let file = DemoFiles::get(self.file).ok_or(DemoError::Missing(self.file))?;
        String::from_utf8(file.data.into_owned()).map_err(|_| DemoError::NotUtf8(self.file))
    }

    /// Reset the VM, apply the sensor presets, load and run the demo
    pub fn run(&self, vm: &mut AirConditionerVm, max_steps: Option<u64>) -> Result<(), DemoError> {
        let source = self.source()?;
        vm.reset();
        for &(sensor, value) in self.sensors {
            vm.set_sensor(sensor.name(), value).map_err(VmError::from)?;
        }
        vm.load(&source).map_err(VmError::from)?;
        vm.run(max_steps).map_err(VmError::from)?;
        Ok(())
    }
}
