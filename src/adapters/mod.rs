//! Adapters used by the command-line host.

pub mod console;
pub mod outcomes;

pub use console::{ConsoleHost, ConsoleScreenFactory, Presentation};
pub use outcomes::{LoggingDelegate, LoggingOutcomes};
