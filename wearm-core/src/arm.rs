//! The arm as one unit
//!
//! Bundles the actuator bank with the capabilities the motion engine
//! borrows: pulse output, tick delay and the shared stop flag.

use embedded_hal_async::delay::DelayNs;
use wearm_protocol::JointMove;

use crate::config::{ArmConfig, ACTUATOR_COUNT};
use crate::intake::StopFlag;
use crate::motion::{MotionEngine, MotionReport};
use crate::servo::ActuatorBank;
use crate::traits::ServoOutput;

/// Actuators plus the hardware they drive
pub struct Arm<'a, O, D> {
    bank: ActuatorBank,
    engine: MotionEngine,
    output: O,
    delay: D,
    stop: &'a StopFlag,
}

impl<'a, O, D> Arm<'a, O, D>
where
    O: ServoOutput,
    D: DelayNs,
{
    /// Build the arm at its initial pose
    ///
    /// Nothing is written to the outputs until [`Arm::sync_outputs`].
    pub fn new(config: &ArmConfig, output: O, delay: D, stop: &'a StopFlag) -> Self {
        Self {
            bank: ActuatorBank::from_config(config),
            engine: MotionEngine::new(&config.motion),
            output,
            delay,
            stop,
        }
    }

    pub fn bank(&self) -> &ActuatorBank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut ActuatorBank {
        &mut self.bank
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn stop_flag(&self) -> &'a StopFlag {
        self.stop
    }

    pub fn pulses(&self) -> [u16; ACTUATOR_COUNT] {
        self.bank.pulses()
    }

    /// Write the current output pulse of every actuator
    pub fn sync_outputs(&mut self) {
        self.bank.sync_outputs(&mut self.output);
    }

    /// Set the static trim of one actuator
    pub fn trim(&mut self, id: usize, offset: i16) {
        self.bank.trim(id, offset, &mut self.output);
    }

    /// Run the motion engine on whatever targets are pending
    pub async fn run(&mut self) -> MotionReport {
        self.engine
            .run(&mut self.bank, &mut self.output, &mut self.delay, self.stop)
            .await
    }

    /// Apply a list of joint targets and move there
    pub async fn move_to(&mut self, moves: &[JointMove]) -> MotionReport {
        self.bank.apply(moves);
        self.run().await
    }

    /// Wait without moving
    pub async fn pause_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }
}
