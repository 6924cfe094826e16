//! Actuator arena
//!
//! Actuators are addressed by small integer id. Ids outside the arena are
//! silently ignored by every write; reads return `None`.

use wearm_protocol::JointMove;

use super::Actuator;
use crate::config::{ActuatorCalibration, ArmConfig, ACTUATOR_COUNT};
use crate::traits::ServoOutput;

/// The fixed set of actuators on the arm
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorBank {
    actuators: [Actuator; ACTUATOR_COUNT],
}

impl ActuatorBank {
    /// Build every actuator at its initial angle
    pub fn new(calibration: &[ActuatorCalibration; ACTUATOR_COUNT]) -> Self {
        Self {
            actuators: calibration.map(|c| Actuator::new(&c)),
        }
    }

    pub fn from_config(config: &ArmConfig) -> Self {
        Self::new(&config.actuators)
    }

    pub const fn len(&self) -> usize {
        ACTUATOR_COUNT
    }

    pub const fn is_empty(&self) -> bool {
        ACTUATOR_COUNT == 0
    }

    pub fn actuator(&self, id: usize) -> Option<&Actuator> {
        self.actuators.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actuator> {
        self.actuators.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actuator> {
        self.actuators.iter_mut()
    }

    /// Calibrated pulse for `angle` on actuator `id`
    pub fn angle_to_pulse(&self, id: usize, angle: u16) -> Option<u16> {
        self.actuator(id).map(|a| a.angle_to_pulse(angle))
    }

    /// Set a target angle; takes effect on the next motion run
    pub fn write_angle(&mut self, id: usize, angle: u16, rate: u16) {
        if let Some(pulse) = self.angle_to_pulse(id, angle) {
            self.write_pulse(id, pulse, rate);
        }
    }

    /// Set a target pulse; takes effect on the next motion run
    pub fn write_pulse(&mut self, id: usize, target_pulse: u16, rate: u16) {
        if let Some(actuator) = self.actuators.get_mut(id) {
            actuator.set_target(target_pulse, rate);
        }
    }

    /// Apply every move of a manual command or pose
    pub fn apply(&mut self, moves: &[JointMove]) {
        for m in moves {
            self.write_angle(m.id as usize, m.angle, m.rate);
        }
    }

    /// Set the static trim of one actuator and rewrite its output at once
    ///
    /// Logical pulse and target are left alone.
    pub fn trim<O: ServoOutput>(&mut self, id: usize, offset: i16, output: &mut O) {
        if let Some(actuator) = self.actuators.get_mut(id) {
            actuator.set_trim(offset);
            output.write_pulse(id, actuator.output_pulse());
        }
    }

    /// Current logical pulse of actuator `id` (before trim)
    pub fn read(&self, id: usize) -> Option<u16> {
        self.actuator(id).map(Actuator::pulse)
    }

    /// Current logical pulse of every actuator, by id
    pub fn pulses(&self) -> [u16; ACTUATOR_COUNT] {
        let mut pulses = [0; ACTUATOR_COUNT];
        for (slot, actuator) in pulses.iter_mut().zip(self.actuators.iter()) {
            *slot = actuator.pulse();
        }
        pulses
    }

    /// Check if every actuator is at its target
    pub fn is_settled(&self) -> bool {
        self.actuators.iter().all(Actuator::is_settled)
    }

    /// Make every actuator's target its current pulse
    pub fn freeze(&mut self) {
        self.actuators.iter_mut().for_each(Actuator::freeze);
    }

    /// Write every actuator's output pulse
    pub fn sync_outputs<O: ServoOutput>(&self, output: &mut O) {
        for (id, actuator) in self.actuators.iter().enumerate() {
            output.write_pulse(id, actuator.output_pulse());
        }
    }
}

impl Default for ActuatorBank {
    fn default() -> Self {
        Self::from_config(&ArmConfig::DEFAULT)
    }
}
