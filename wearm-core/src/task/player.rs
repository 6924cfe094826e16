//! Task player
//!
//! Replays a stored pose sequence one waypoint at a time. Every waypoint
//! is applied as a uniform-rate move list, the same shape a manual
//! command produces, and the next waypoint starts only after the motion
//! engine returns.

use embedded_hal_async::delay::DelayNs;
use wearm_protocol::{JointMove, MoveList, Response};

use super::{Pose, TaskId};
use crate::arm::Arm;
use crate::config::{MotionConfig, StopPolicy};
use crate::traits::{Console, ServoOutput};

/// Errors reported by the task player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskError {
    /// No task with that index
    OutOfRange,
}

/// Summary of one task run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskReport {
    /// Waypoints started
    pub waypoints: usize,
    /// At least one waypoint was cut short by a stop
    pub cancelled: bool,
}

/// Build the move list for a pose at a uniform rate
pub fn pose_moves(pose: &Pose, rate: u16) -> MoveList {
    let mut moves = MoveList::new();
    for (id, &angle) in pose.iter().enumerate() {
        // Cannot fail: a pose is shorter than MAX_MOVES
        let _ = moves.push(JointMove::new(id as u16, angle, rate));
    }
    moves
}

/// Plays stored tasks through the motion engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskPlayer {
    rate: u16,
    pause_ms: u32,
    stop_policy: StopPolicy,
}

impl Default for TaskPlayer {
    fn default() -> Self {
        Self::new(&MotionConfig::DEFAULT)
    }
}

impl TaskPlayer {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            rate: config.task_rate.max(1),
            pause_ms: config.waypoint_pause_ms,
            stop_policy: config.stop_policy,
        }
    }

    pub fn stop_policy(&self) -> StopPolicy {
        self.stop_policy
    }

    /// Play task `task`
    ///
    /// An unknown index is reported as an error before anything is sent or
    /// moved. A stop cancels the waypoint in flight; whether the rest of
    /// the sequence still plays depends on the [`StopPolicy`].
    pub async fn execute<O, D, C>(
        &self,
        task: i32,
        arm: &mut Arm<'_, O, D>,
        console: &mut C,
    ) -> Result<TaskReport, TaskError>
    where
        O: ServoOutput,
        D: DelayNs,
        C: Console,
    {
        let id = TaskId::from_index(task).ok_or(TaskError::OutOfRange)?;
        console.send(Response::ExecutingTask(id.index())).await;

        let mut report = TaskReport::default();
        match id.sequence() {
            Some(sequence) => {
                for (step, pose) in sequence.iter().enumerate() {
                    // Waypoints get no status line or `OK`; the caller
                    // replies once after `TaskFinished`.
                    console.send(Response::TaskStep(step)).await;
                    report.waypoints += 1;

                    let motion = arm.move_to(&pose_moves(pose, self.rate)).await;
                    if motion.is_cancelled() {
                        console.send(Response::MovementStopped).await;
                        report.cancelled = true;
                        if self.stop_policy == StopPolicy::AbortSequence {
                            break;
                        }
                    }

                    arm.pause_ms(self.pause_ms).await;
                }
            }
            None => console.send(Response::UnknownTask).await,
        }

        console.send(Response::TaskFinished).await;
        Ok(report)
    }
}
