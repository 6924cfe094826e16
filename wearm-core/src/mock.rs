//! Mock hardware for host tests

use embedded_hal_async::delay::DelayNs;
use wearm_protocol::Response;

use crate::config::ACTUATOR_COUNT;
use crate::intake::StopFlag;
use crate::traits::{Console, Indicator, ServoOutput};

/// Records every physical pulse write
#[derive(Debug, Default)]
pub struct MockOutput {
    writes: Vec<(usize, u16)>,
    last: [u16; ACTUATOR_COUNT],
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[(usize, u16)] {
        &self.writes
    }

    /// Last pulse written per id (0 if never written)
    pub fn last(&self) -> [u16; ACTUATOR_COUNT] {
        self.last
    }

    pub fn writes_for(&self, id: usize) -> usize {
        self.writes.iter().filter(|(i, _)| *i == id).count()
    }
}

impl ServoOutput for MockOutput {
    fn write_pulse(&mut self, id: usize, pulse_us: u16) {
        self.writes.push((id, pulse_us));
        if let Some(slot) = self.last.get_mut(id) {
            *slot = pulse_us;
        }
    }
}

/// Delay that returns at once and counts ticks
///
/// `delay_us` calls are ticks; `delay_ms` calls are pauses. Optionally
/// raises a stop request when a given tick completes.
#[derive(Debug, Default)]
pub struct TickDelay<'a> {
    ticks: u32,
    pauses: Vec<u32>,
    stop_at: Option<(u32, &'a StopFlag)>,
}

impl<'a> TickDelay<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop once `ticks` ticks have elapsed in total
    pub fn stop_after(ticks: u32, stop: &'a StopFlag) -> Self {
        Self {
            stop_at: Some((ticks, stop)),
            ..Self::default()
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn pauses(&self) -> &[u32] {
        &self.pauses
    }
}

impl DelayNs for TickDelay<'_> {
    async fn delay_ns(&mut self, _ns: u32) {}

    async fn delay_us(&mut self, _us: u32) {
        self.ticks += 1;
        if let Some((at, stop)) = self.stop_at {
            if self.ticks == at {
                stop.request();
            }
        }
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.pauses.push(ms);
    }
}

/// Collects rendered replies
#[derive(Debug, Default)]
pub struct RecordingConsole {
    lines: Vec<String>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.lines.iter().map(String::as_str).collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Console for RecordingConsole {
    async fn send(&mut self, response: Response<'_>) {
        self.lines.push(std::format!("{}", response));
    }
}

/// Records indicator transitions
#[derive(Debug, Default)]
pub struct MockIndicator {
    transitions: Vec<bool>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> &[bool] {
        &self.transitions
    }
}

impl Indicator for MockIndicator {
    fn set_active(&mut self, active: bool) {
        self.transitions.push(active);
    }
}
