//! Tick-based multi-axis interpolation
//!
//! Each tick, every actuator that has not arrived and whose rate divides
//! the tick counter moves one microsecond toward its target. The engine
//! sleeps one tick between passes and returns once everything has arrived
//! or a stop is observed at the top of a tick.

use embedded_hal_async::delay::DelayNs;

use crate::config::MotionConfig;
use crate::intake::StopFlag;
use crate::servo::ActuatorBank;
use crate::traits::ServoOutput;

/// How a motion run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionOutcome {
    /// Every actuator reached its target
    Arrived,
    /// A stop froze the actuators in place
    Cancelled,
}

/// Result of one motion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionReport {
    /// Ticks elapsed (0 if nothing had to move)
    pub ticks: u32,
    pub outcome: MotionOutcome,
}

impl MotionReport {
    pub fn is_cancelled(&self) -> bool {
        self.outcome == MotionOutcome::Cancelled
    }
}

/// Cooperative interpolation driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionEngine {
    /// Tick length in microseconds
    tick_us: u32,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new(&MotionConfig::DEFAULT)
    }
}

impl MotionEngine {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            tick_us: config.tick_us.max(1),
        }
    }

    pub fn tick_us(&self) -> u32 {
        self.tick_us
    }

    /// Move every actuator to its target
    ///
    /// Clears any stale stop request before the first tick. A stop seen at
    /// the top of a tick freezes every actuator where it is and consumes
    /// the request.
    pub async fn run<O, D>(
        &self,
        bank: &mut ActuatorBank,
        output: &mut O,
        delay: &mut D,
        stop: &StopFlag,
    ) -> MotionReport
    where
        O: ServoOutput,
        D: DelayNs,
    {
        stop.clear();
        let mut ticks: u32 = 0;

        loop {
            if stop.take() {
                bank.freeze();
                return MotionReport {
                    ticks,
                    outcome: MotionOutcome::Cancelled,
                };
            }

            let mut running = false;
            for (id, actuator) in bank.iter_mut().enumerate() {
                if actuator.is_settled() {
                    continue;
                }
                running = true;

                if ticks % actuator.rate() as u32 == 0 {
                    actuator.step();
                    output.write_pulse(id, actuator.output_pulse());
                }
            }

            if !running {
                return MotionReport {
                    ticks,
                    outcome: MotionOutcome::Arrived,
                };
            }

            delay.delay_us(self.tick_us).await;
            ticks = ticks.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockOutput, TickDelay};
    use embassy_futures::block_on;

    fn run(
        bank: &mut ActuatorBank,
        output: &mut MockOutput,
        delay: &mut TickDelay<'_>,
        stop: &StopFlag,
    ) -> MotionReport {
        block_on(MotionEngine::default().run(bank, output, delay, stop))
    }

    #[test]
    fn test_settled_bank_takes_no_ticks() {
        let mut bank = ActuatorBank::default();
        let mut output = MockOutput::new();
        let mut delay = TickDelay::new();
        let stop = StopFlag::new();

        let report = run(&mut bank, &mut output, &mut delay, &stop);

        assert_eq!(report.ticks, 0);
        assert_eq!(report.outcome, MotionOutcome::Arrived);
        assert_eq!(delay.ticks(), 0);
        assert!(output.writes().is_empty());
    }

    #[test]
    fn test_reissuing_target_is_idempotent() {
        let mut bank = ActuatorBank::default();
        let current = bank.read(3).unwrap();
        bank.write_pulse(3, current, 5);

        let mut output = MockOutput::new();
        let report = run(&mut bank, &mut output, &mut TickDelay::new(), &StopFlag::new());
        assert_eq!(report.ticks, 0);
    }

    #[test]
    fn test_tick_count_follows_rate() {
        // distance d at rate r: steps at ticks 0, r, .., (d-1)r
        for rate in [1u16, 2, 3, 7] {
            let mut bank = ActuatorBank::default();
            bank.write_pulse(2, 1462 + 10, rate);

            let mut delay = TickDelay::new();
            let report = run(&mut bank, &mut MockOutput::new(), &mut delay, &StopFlag::new());

            assert_eq!(report.ticks, 9 * rate as u32 + 1);
            assert_eq!(delay.ticks(), report.ticks);
            assert_eq!(bank.read(2), Some(1472));
        }
    }

    #[test]
    fn test_independent_rates() {
        let mut bank = ActuatorBank::default();
        let mut output = MockOutput::new();
        bank.write_pulse(1, 1462 + 20, 1);
        bank.write_pulse(2, 1462 - 20, 3);

        let report = run(&mut bank, &mut output, &mut TickDelay::new(), &StopFlag::new());

        // Slower actuator dominates
        assert_eq!(report.ticks, 19 * 3 + 1);
        assert_eq!(bank.read(1), Some(1482));
        assert_eq!(bank.read(2), Some(1442));
        assert_eq!(output.writes_for(1), 20);
        assert_eq!(output.writes_for(2), 20);
        assert!(bank.is_settled());
    }

    #[test]
    fn test_writes_include_trim() {
        let mut bank = ActuatorBank::default();
        let mut output = MockOutput::new();
        bank.trim(4, 15, &mut output);
        bank.write_pulse(4, 1465, 1);

        run(&mut bank, &mut output, &mut TickDelay::new(), &StopFlag::new());

        assert_eq!(bank.read(4), Some(1465));
        assert_eq!(output.last()[4], 1480);
    }

    #[test]
    fn test_stale_stop_is_cleared() {
        let mut bank = ActuatorBank::default();
        bank.write_pulse(0, 1917, 1);
        let stop = StopFlag::new();
        stop.request();

        let report = run(&mut bank, &mut MockOutput::new(), &mut TickDelay::new(), &stop);

        assert_eq!(report.outcome, MotionOutcome::Arrived);
        assert_eq!(bank.read(0), Some(1917));
    }

    #[test]
    fn test_stop_freezes_mid_flight() {
        let mut bank = ActuatorBank::default();
        bank.write_pulse(0, 1907 + 100, 1);
        bank.write_pulse(5, 1462 + 100, 2);

        let stop = StopFlag::new();
        let mut delay = TickDelay::stop_after(10, &stop);
        let report = run(&mut bank, &mut MockOutput::new(), &mut delay, &stop);

        assert_eq!(report.outcome, MotionOutcome::Cancelled);
        assert_eq!(report.ticks, 10);
        // Ticks 0..=9 ran: ten steps at rate 1, five at rate 2
        assert_eq!(bank.read(0), Some(1917));
        assert_eq!(bank.read(5), Some(1467));
        for actuator in bank.iter() {
            assert_eq!(actuator.pulse(), actuator.target());
        }
        assert!(!stop.is_requested());
    }

    mod prop {
        use super::*;
        use crate::config::ACTUATOR_COUNT;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn uncancelled_run_ends_at_clamped_target(
                id in 0usize..ACTUATOR_COUNT,
                target in 0u16..3000,
                rate in 0u16..4,
            ) {
                let mut bank = ActuatorBank::default();
                bank.write_pulse(id, target, rate);
                let (min, max) = {
                    let a = bank.actuator(id).unwrap();
                    (a.pulse_min(), a.pulse_max())
                };

                let mut output = MockOutput::new();
                let report = run(&mut bank, &mut output, &mut TickDelay::new(), &StopFlag::new());

                prop_assert_eq!(report.outcome, MotionOutcome::Arrived);
                prop_assert_eq!(bank.read(id), Some(target.clamp(min, max)));
            }
        }
    }
}
