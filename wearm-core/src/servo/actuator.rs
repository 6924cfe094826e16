//! Single actuator state
//!
//! Pulse widths are in microseconds. The logical pulse is what the motion
//! engine interpolates; the output pulse adds the static trim and is
//! clamped to the servo's absolute range.

use crate::config::{ActuatorCalibration, BASE_PULSE_MAX, BASE_PULSE_MIN};

/// One position-controlled servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Actuator {
    /// Current logical pulse (always within `pulse_min..=pulse_max`)
    pulse: u16,
    pulse_min: u16,
    pulse_max: u16,
    angle_min: u16,
    angle_max: u16,
    /// Pulse at the time the current target was accepted
    start: u16,
    /// Pulse being moved toward (always within `pulse_min..=pulse_max`)
    target: u16,
    /// Ticks per one-microsecond step, at least 1
    rate: u16,
    /// Signed offset added at the output stage
    trim: i16,
}

impl Actuator {
    /// Create an actuator resting at its calibrated initial angle
    pub fn new(calibration: &ActuatorCalibration) -> Self {
        let mut actuator = Self {
            pulse: 0,
            pulse_min: calibration.pulse_min(),
            pulse_max: calibration.pulse_max(),
            angle_min: calibration.angle_min,
            angle_max: calibration.angle_max,
            start: 0,
            target: 0,
            rate: 1,
            trim: 0,
        };
        let initial = actuator.angle_to_pulse(calibration.initial_angle);
        actuator.pulse = initial;
        actuator.start = initial;
        actuator.target = initial;
        actuator
    }

    /// Map an angle to a pulse width
    ///
    /// The angle is clamped into the calibrated window first. A degenerate
    /// window maps everything to `pulse_min`.
    pub fn angle_to_pulse(&self, angle: u16) -> u16 {
        let angle = angle.max(self.angle_min).min(self.angle_max);

        let angle_range = self.angle_max.saturating_sub(self.angle_min) as u32;
        if angle_range == 0 {
            return self.pulse_min;
        }
        let pulse_range = self.pulse_max.saturating_sub(self.pulse_min) as u32;

        let offset = (angle - self.angle_min) as u32 * pulse_range / angle_range;
        self.pulse_min + offset as u16
    }

    /// Accept a new target
    ///
    /// The target is clamped into the calibrated pulse window and `rate` is
    /// raised to at least 1. Nothing moves until the motion engine runs.
    pub fn set_target(&mut self, target_pulse: u16, rate: u16) {
        self.start = self.pulse;
        self.target = target_pulse.max(self.pulse_min).min(self.pulse_max);
        self.rate = rate.max(1);
    }

    /// Advance one microsecond toward the target
    ///
    /// Returns `false` if already there.
    pub(crate) fn step(&mut self) -> bool {
        if self.pulse < self.target {
            self.pulse += 1;
            true
        } else if self.pulse > self.target {
            self.pulse -= 1;
            true
        } else {
            false
        }
    }

    /// Stop where it is
    pub(crate) fn freeze(&mut self) {
        self.target = self.pulse;
    }

    pub(crate) fn set_trim(&mut self, trim: i16) {
        self.trim = trim;
    }

    /// Pulse to put on the wire: logical pulse plus trim, clamped to the
    /// servo's absolute range
    pub fn output_pulse(&self) -> u16 {
        let trimmed = self.pulse as i32 + self.trim as i32;
        trimmed.clamp(BASE_PULSE_MIN as i32, BASE_PULSE_MAX as i32) as u16
    }

    pub fn pulse(&self) -> u16 {
        self.pulse
    }

    pub fn target(&self) -> u16 {
        self.target
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn rate(&self) -> u16 {
        self.rate
    }

    pub fn trim(&self) -> i16 {
        self.trim
    }

    pub fn pulse_min(&self) -> u16 {
        self.pulse_min
    }

    pub fn pulse_max(&self) -> u16 {
        self.pulse_max
    }

    pub fn angle_min(&self) -> u16 {
        self.angle_min
    }

    pub fn angle_max(&self) -> u16 {
        self.angle_max
    }

    /// Check if the actuator is at its target
    pub fn is_settled(&self) -> bool {
        self.pulse == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoulder() -> Actuator {
        Actuator::new(&ActuatorCalibration::new(50, 210, 130))
    }

    #[test]
    fn test_initial_state() {
        let a = shoulder();
        assert_eq!(a.pulse(), 1462);
        assert_eq!(a.target(), 1462);
        assert_eq!(a.start(), 1462);
        assert_eq!(a.rate(), 1);
        assert!(a.is_settled());
    }

    #[test]
    fn test_angle_to_pulse_clamps() {
        let a = shoulder();
        assert_eq!(a.angle_to_pulse(0), a.pulse_min());
        assert_eq!(a.angle_to_pulse(50), a.pulse_min());
        assert_eq!(a.angle_to_pulse(210), a.pulse_max());
        assert_eq!(a.angle_to_pulse(u16::MAX), a.pulse_max());
    }

    #[test]
    fn test_degenerate_window() {
        let a = Actuator::new(&ActuatorCalibration::new(90, 90, 90));
        assert_eq!(a.angle_to_pulse(0), a.pulse_min());
        assert_eq!(a.angle_to_pulse(200), a.pulse_min());
    }

    #[test]
    fn test_set_target_clamps_and_normalises_rate() {
        let mut a = shoulder();
        a.set_target(100, 0);
        assert_eq!(a.target(), a.pulse_min());
        assert_eq!(a.rate(), 1);
        assert_eq!(a.start(), 1462);

        a.set_target(5000, 7);
        assert_eq!(a.target(), a.pulse_max());
        assert_eq!(a.rate(), 7);
    }

    #[test]
    fn test_step_toward_target() {
        let mut a = shoulder();
        a.set_target(1465, 1);
        assert!(a.step());
        assert_eq!(a.pulse(), 1463);
        assert!(a.step());
        assert!(a.step());
        assert!(!a.step());
        assert!(a.is_settled());

        a.set_target(1460, 1);
        assert!(a.step());
        assert_eq!(a.pulse(), 1464);
    }

    #[test]
    fn test_output_pulse_trim_and_clamp() {
        let mut a = Actuator::new(&ActuatorCalibration::new(0, 270, 0));
        assert_eq!(a.output_pulse(), 500);

        a.set_trim(-40);
        assert_eq!(a.output_pulse(), 500);
        assert_eq!(a.pulse(), 500);

        a.set_trim(25);
        assert_eq!(a.output_pulse(), 525);
    }
}
