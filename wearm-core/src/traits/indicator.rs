//! Audible/visual indicator output

/// An on/off indicator such as a buzzer or LED
pub trait Indicator {
    /// Switch the indicator on or off
    fn set_active(&mut self, active: bool);
}
