//! Board-agnostic motion core for the arm firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware capability traits (servo output, indicator, console)
//! - Raw byte queue and line intake shared with the receive path
//! - Actuator bank with calibrated angle/pulse mapping
//! - Tick-based interpolation engine with cooperative stop
//! - Stored pose sequences and the task player
//! - Command dispatch for the serial protocol

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod arm;
pub mod config;
pub mod dispatch;
pub mod intake;
pub mod motion;
pub mod queue;
pub mod servo;
pub mod task;
pub mod traits;

#[cfg(test)]
mod mock;

pub use arm::Arm;
pub use dispatch::Dispatcher;
