//! Actuator calibration table
//!
//! Every servo on the reference arm accepts 500-2500 µs over a 270° sweep.
//! Each joint is mechanically limited to a narrower angle window; its
//! calibrated pulse limits are the base mapping evaluated at those angles.

/// Number of actuators on the arm
pub const ACTUATOR_COUNT: usize = 6;

/// Shortest pulse the servos accept (µs), also the physical output floor
pub const BASE_PULSE_MIN: u16 = 500;

/// Longest pulse the servos accept (µs), also the physical output ceiling
pub const BASE_PULSE_MAX: u16 = 2500;

/// Full mechanical sweep of the servos (degrees)
pub const BASE_ANGLE_MAX: u16 = 270;

/// Calibration of one actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorCalibration {
    /// Lowest allowed angle (degrees)
    pub angle_min: u16,
    /// Highest allowed angle (degrees)
    pub angle_max: u16,
    /// Angle the joint is driven to at boot
    pub initial_angle: u16,
}

impl ActuatorCalibration {
    pub const fn new(angle_min: u16, angle_max: u16, initial_angle: u16) -> Self {
        Self {
            angle_min,
            angle_max,
            initial_angle,
        }
    }

    /// Calibrated lower pulse limit (µs)
    pub const fn pulse_min(&self) -> u16 {
        base_pulse(self.angle_min)
    }

    /// Calibrated upper pulse limit (µs)
    pub const fn pulse_max(&self) -> u16 {
        base_pulse(self.angle_max)
    }

    /// Check the window is ordered, inside the servo sweep, and holds the
    /// initial angle
    pub const fn is_valid(&self) -> bool {
        self.angle_min < self.angle_max
            && self.angle_max <= BASE_ANGLE_MAX
            && self.initial_angle >= self.angle_min
            && self.initial_angle <= self.angle_max
    }
}

/// Map an angle on the full servo sweep to its pulse width
///
/// Angles past [`BASE_ANGLE_MAX`] saturate.
pub const fn base_pulse(angle: u16) -> u16 {
    let angle = if angle > BASE_ANGLE_MAX {
        BASE_ANGLE_MAX
    } else {
        angle
    };
    let span = (BASE_PULSE_MAX - BASE_PULSE_MIN) as u32;
    BASE_PULSE_MIN + (angle as u32 * span / BASE_ANGLE_MAX as u32) as u16
}

/// Factory calibration: base, shoulder, elbow, wrist pitch, wrist roll, gripper
pub const DEFAULT_CALIBRATION: [ActuatorCalibration; ACTUATOR_COUNT] = [
    ActuatorCalibration::new(0, 270, 190),
    ActuatorCalibration::new(50, 210, 130),
    ActuatorCalibration::new(20, 250, 130),
    ActuatorCalibration::new(40, 210, 130),
    ActuatorCalibration::new(40, 210, 130),
    ActuatorCalibration::new(100, 175, 130),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_pulse_endpoints() {
        assert_eq!(base_pulse(0), BASE_PULSE_MIN);
        assert_eq!(base_pulse(BASE_ANGLE_MAX), BASE_PULSE_MAX);
        assert_eq!(base_pulse(1000), BASE_PULSE_MAX);
    }

    #[test]
    fn test_factory_pulse_limits() {
        let shoulder = DEFAULT_CALIBRATION[1];
        assert_eq!(shoulder.pulse_min(), 870);
        assert_eq!(shoulder.pulse_max(), 2055);

        let gripper = DEFAULT_CALIBRATION[5];
        assert_eq!(gripper.pulse_min(), 1240);
        assert_eq!(gripper.pulse_max(), 1796);
    }

    #[test]
    fn test_factory_table_is_valid() {
        assert!(DEFAULT_CALIBRATION.iter().all(|c| c.is_valid()));
    }

    #[test]
    fn test_invalid_windows() {
        assert!(!ActuatorCalibration::new(100, 100, 100).is_valid());
        assert!(!ActuatorCalibration::new(0, 300, 10).is_valid());
        assert!(!ActuatorCalibration::new(50, 100, 120).is_valid());
    }
}
