// VM module entry point

pub mod error;
pub mod executor;
pub mod instruction;
pub mod machine;
mod operand;
pub mod parser;
pub mod registers;
pub mod state;
