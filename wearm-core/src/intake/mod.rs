//! Command intake
//!
//! The boundary between the asynchronous receive context and the
//! cooperative controller loop.

pub mod line;
pub mod stop;

pub use line::{CommandIntake, CommandLine, IntakeEvent, IntakeOutcome, Mailbox, LINE_CAPACITY};
pub use stop::StopFlag;
