//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod intake;

pub use controller::controller_task;
pub use intake::intake_task;
