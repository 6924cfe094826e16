//! PWM hobby-servo output
//!
//! A hobby servo reads the high time of a 50 Hz pulse train. The driver
//! converts a pulse width in microseconds into a duty-cycle fraction of
//! the frame period, so it works with any `embedded-hal` PWM channel
//! whatever its timer resolution.
//!
//! ```ignore
//! let mut base = PwmServo::new(tim2.ch2);
//! let mut shoulder = PwmServo::new(tim4.ch3);
//! let mut bank = PwmServoBank::new([&mut base, &mut shoulder]);
//! bank.write_pulse(1, 1500);
//! ```

use embedded_hal::pwm::SetDutyCycle;
use wearm_core::config::{BASE_PULSE_MAX, BASE_PULSE_MIN};
use wearm_core::traits::ServoOutput;

/// Standard servo frame period (µs), 50 Hz
pub const FRAME_PERIOD_US: u16 = 20_000;

/// Object-safe pulse output, so channels of different timers can share
/// one bank
pub trait PulseOutput {
    /// Drive the channel with a pulse of `pulse_us` microseconds
    fn set_pulse_us(&mut self, pulse_us: u16);
}

/// One servo on one PWM channel
pub struct PwmServo<P> {
    channel: P,
    /// Frame period the timer was configured for (µs)
    period_us: u16,
    /// Last pulse written (µs)
    pulse_us: u16,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Wrap a channel running at the standard 50 Hz frame rate
    pub fn new(channel: P) -> Self {
        Self::with_period(channel, FRAME_PERIOD_US)
    }

    /// Wrap a channel running at a non-standard frame period
    pub fn with_period(channel: P, period_us: u16) -> Self {
        Self {
            channel,
            period_us: period_us.max(BASE_PULSE_MAX),
            pulse_us: 0,
        }
    }

    /// Write a pulse, clamped to the servo's absolute range
    pub fn write(&mut self, pulse_us: u16) -> Result<(), P::Error> {
        let pulse_us = pulse_us.clamp(BASE_PULSE_MIN, BASE_PULSE_MAX);
        self.channel.set_duty_cycle_fraction(pulse_us, self.period_us)?;
        self.pulse_us = pulse_us;
        Ok(())
    }

    /// Last pulse successfully written (0 before the first write)
    pub fn pulse_us(&self) -> u16 {
        self.pulse_us
    }

    pub fn release(self) -> P {
        self.channel
    }
}

impl<P: SetDutyCycle> PulseOutput for PwmServo<P> {
    fn set_pulse_us(&mut self, pulse_us: u16) {
        // Timer channels on supported boards cannot fail
        let _ = self.write(pulse_us);
    }
}

/// Servo outputs addressed by actuator id
pub struct PwmServoBank<'a, const N: usize> {
    channels: [&'a mut dyn PulseOutput; N],
}

impl<'a, const N: usize> PwmServoBank<'a, N> {
    /// Channel `i` drives actuator `i`
    pub fn new(channels: [&'a mut dyn PulseOutput; N]) -> Self {
        Self { channels }
    }

    pub const fn channel_count(&self) -> usize {
        N
    }
}

impl<const N: usize> ServoOutput for PwmServoBank<'_, N> {
    fn write_pulse(&mut self, id: usize, pulse_us: u16) {
        if let Some(channel) = self.channels.get_mut(id) {
            channel.set_pulse_us(pulse_us);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// Mock 16-bit PWM channel
    struct MockChannel {
        max: u16,
        duty: u16,
    }

    impl MockChannel {
        fn new(max: u16) -> Self {
            Self { max, duty: 0 }
        }
    }

    impl ErrorType for MockChannel {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockChannel {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_pulse_to_duty() {
        // 1 µs per count, as with a 72 MHz timer prescaled to 1 MHz
        let mut servo = PwmServo::new(MockChannel::new(20_000));
        servo.write(1500).unwrap();
        assert_eq!(servo.pulse_us(), 1500);
        assert_eq!(servo.release().duty, 1500);
    }

    #[test]
    fn test_coarse_timer_scales() {
        let mut servo = PwmServo::new(MockChannel::new(1000));
        servo.write(2000).unwrap();
        assert_eq!(servo.release().duty, 100);
    }

    #[test]
    fn test_pulse_clamped() {
        let mut servo = PwmServo::new(MockChannel::new(20_000));
        servo.write(100).unwrap();
        assert_eq!(servo.pulse_us(), BASE_PULSE_MIN);
        servo.write(9000).unwrap();
        assert_eq!(servo.pulse_us(), BASE_PULSE_MAX);
    }

    #[test]
    fn test_bank_routes_by_id() {
        let mut a = PwmServo::new(MockChannel::new(20_000));
        let mut b = PwmServo::new(MockChannel::new(20_000));

        {
            let mut bank = PwmServoBank::new([&mut a, &mut b]);
            assert_eq!(bank.channel_count(), 2);
            bank.write_pulse(1, 1234);
            bank.write_pulse(0, 1907);
            // Unknown id ignored
            bank.write_pulse(2, 600);
        }

        assert_eq!(a.pulse_us(), 1907);
        assert_eq!(b.pulse_us(), 1234);
    }
}
