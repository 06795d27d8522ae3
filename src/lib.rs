pub mod config;
pub mod demos;
pub mod device;
pub mod environment;
pub mod logging;
pub mod vm;

pub use vm::error::{ExecError, ParseError, VmError};
pub use vm::machine::AirConditionerVm;
pub use vm::state::{Snapshot, VmEvent};
