//! Stored tasks
//!
//! Fixed pose sequences authored at build time and the player that runs
//! them.

pub mod player;
pub mod poses;

pub use player::{pose_moves, TaskError, TaskPlayer, TaskReport};
pub use poses::{Pose, TaskId, PICK_AND_PLACE, TASK_COUNT};
