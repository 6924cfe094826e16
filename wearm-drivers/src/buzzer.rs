//! GPIO buzzer
//!
//! Active buzzer on a push-pull pin, optionally through an inverting
//! transistor stage.

use embedded_hal::digital::OutputPin;
use wearm_core::traits::Indicator;

/// Buzzer driven by a single output pin
pub struct Buzzer<P> {
    pin: P,
    /// If true, buzzer ON = pin LOW
    inverted: bool,
    active: bool,
}

impl<P: OutputPin> Buzzer<P> {
    /// Create a buzzer, initially silent
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut buzzer = Self {
            pin,
            inverted,
            active: false,
        };
        buzzer.set_active(false);
        buzzer
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<P: OutputPin> Indicator for Buzzer<P> {
    fn set_active(&mut self, active: bool) {
        self.active = active;

        // GPIO writes on supported boards are infallible
        let _ = if active != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}
