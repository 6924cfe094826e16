//! Hardware driver implementations
//!
//! Concrete implementations of the capability traits defined in
//! wearm-core, written against `embedded-hal` so they work with any
//! board support crate:
//!
//! - Servo outputs on PWM timer channels
//! - Buzzer on a GPIO pin

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod servo;

pub use buzzer::Buzzer;
pub use servo::{PulseOutput, PwmServo, PwmServoBank, FRAME_PERIOD_US};
