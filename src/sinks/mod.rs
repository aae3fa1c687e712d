//! Ready-made log destinations
//!
//! Any `std::io::Write + Send` value can be a sink; these cover the common
//! cases.

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;

pub use console::{ConsoleSink, ConsoleTarget};
#[cfg(feature = "file")]
pub use file::FileSink;
pub use memory::MemorySink;
