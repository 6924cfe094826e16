//! Controller task
//!
//! The cooperative main loop: boots the arm, then executes one request
//! line at a time. A move or task runs to completion (or until stopped)
//! before the next line is taken from the mailbox.

use defmt::*;
use embassy_stm32::gpio::Output;
use embassy_time::Delay;

use wearm_core::Dispatcher;
use wearm_drivers::Buzzer;

use crate::channels::{MAILBOX, STOP};
use crate::config::ARM_CONFIG;
use crate::console::UartConsole;
use crate::servos::ServoChannels;

/// Controller task - owns the servos and the buzzer
#[embassy_executor::task]
pub async fn controller_task(mut servos: ServoChannels, buzzer: Output<'static>) {
    info!("Controller task started");

    let mut console = UartConsole;
    let mut dispatcher = Dispatcher::new(
        &ARM_CONFIG,
        servos.bank(),
        Delay,
        Buzzer::new_active_high(buzzer),
        &STOP,
    );

    dispatcher.boot(&mut console).await;
    info!("Arm at home pose: {:?}", dispatcher.arm().pulses());

    loop {
        let line = MAILBOX.receive().await;
        debug!("Line: {=[u8]:a}", line.as_bytes());

        if let Err(e) = dispatcher.handle_line(&line, &mut console).await {
            warn!("Rejected request: {:?}", e);
        }
        trace!("Pulses: {:?}", dispatcher.arm().pulses());
    }
}
