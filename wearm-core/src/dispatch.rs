//! Command dispatch
//!
//! The controller loop hands every line taken from the mailbox to
//! [`Dispatcher::handle_line`], which parses it, drives the arm and
//! writes the replies. Calls run to completion; a move or task keeps the
//! controller busy until the motion engine returns.

use embedded_hal_async::delay::DelayNs;
use wearm_protocol::{Command, ParseError, Response, StatusLine, BANNER};

use crate::arm::Arm;
use crate::config::{ArmConfig, MotionConfig};
use crate::intake::{CommandLine, StopFlag};
use crate::task::TaskPlayer;
use crate::traits::{Console, Indicator, ServoOutput};

/// Parses request lines and executes them on the arm
pub struct Dispatcher<'a, O, D, I> {
    arm: Arm<'a, O, D>,
    player: TaskPlayer,
    indicator: I,
    motion: MotionConfig,
}

impl<'a, O, D, I> Dispatcher<'a, O, D, I>
where
    O: ServoOutput,
    D: DelayNs,
    I: Indicator,
{
    pub fn new(config: &ArmConfig, output: O, delay: D, indicator: I, stop: &'a StopFlag) -> Self {
        Self {
            arm: Arm::new(config, output, delay, stop),
            player: TaskPlayer::new(&config.motion),
            indicator,
            motion: config.motion,
        }
    }

    pub fn arm(&self) -> &Arm<'a, O, D> {
        &self.arm
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Drive every actuator to its initial pose and print the banner
    pub async fn boot<C: Console>(&mut self, console: &mut C) {
        self.arm.sync_outputs();
        self.arm.pause_ms(self.motion.settle_ms).await;
        self.arm.run().await;
        self.arm.pause_ms(self.motion.settle_ms).await;

        for &line in BANNER {
            console.send(Response::Text(line)).await;
        }
    }

    /// Execute one request line
    ///
    /// Every outcome, including rejection, has already been answered on
    /// the console when this returns. The parse error is passed back so
    /// the caller can log it.
    pub async fn handle_line<C: Console>(
        &mut self,
        line: &CommandLine,
        console: &mut C,
    ) -> Result<(), ParseError> {
        let text = match line.as_str() {
            Ok(text) => text,
            Err(e) => {
                console.send(Response::Malformed).await;
                return Err(e);
            }
        };

        let command = match Command::parse(text) {
            Ok(command) => command,
            Err(ParseError::Empty) => return Ok(()),
            Err(e @ ParseError::BadTaskId) => {
                console.send(Response::InvalidTaskId).await;
                return Err(e);
            }
            Err(e) => {
                console.send(Response::Malformed).await;
                return Err(e);
            }
        };

        match command {
            Command::Move(moves) => {
                console.send(Response::ManualEcho(text)).await;
                let report = self.arm.move_to(&moves).await;
                if report.is_cancelled() {
                    console.send(Response::MovementStopped).await;
                }
                self.send_status(console).await;
            }
            Command::Run(task) => {
                if self.player.execute(task, &mut self.arm, console).await.is_err() {
                    console.send(Response::InvalidTaskId).await;
                    return Ok(());
                }
                self.send_status(console).await;
            }
            Command::Trim { id, offset } => {
                self.arm.trim(id as usize, offset);
                self.send_status(console).await;
            }
            Command::Beep => {
                console.send(Response::BeepEcho).await;
                self.indicator.set_active(true);
                self.arm.pause_ms(self.motion.beep_ms).await;
                self.indicator.set_active(false);
                console.send(Response::Ok).await;
            }
            Command::Stop => {
                self.arm.stop_flag().request();
                console.send(Response::StopAck).await;
            }
        }

        Ok(())
    }

    /// Status line followed by `OK`
    async fn send_status<C: Console>(&mut self, console: &mut C) {
        let pulses = self.arm.pulses();
        console.send(Response::Status(StatusLine(&pulses))).await;
        console.send(Response::Ok).await;
    }
}
