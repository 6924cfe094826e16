//! Servo pulse output

/// Physical pulse output for a bank of servos
///
/// Implementations write the compare value of the PWM channel bound to
/// `id`. The pulse is already trimmed and clamped to the servo's absolute
/// range by the caller.
pub trait ServoOutput {
    /// Drive actuator `id` with a pulse of `pulse_us` microseconds
    ///
    /// Unknown ids must be ignored.
    fn write_pulse(&mut self, id: usize, pulse_us: u16);
}

impl<T: ServoOutput + ?Sized> ServoOutput for &mut T {
    fn write_pulse(&mut self, id: usize, pulse_us: u16) {
        T::write_pulse(self, id, pulse_us)
    }
}
