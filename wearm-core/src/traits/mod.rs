//! Hardware capability traits
//!
//! These traits define the interface between the motion core and the
//! board-specific implementations. The core owns none of the hardware; it
//! borrows these capabilities for the duration of a call.

pub mod console;
pub mod indicator;
pub mod servo;

pub use console::Console;
pub use indicator::Indicator;
pub use servo::ServoOutput;
