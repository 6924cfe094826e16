//! Host UART receive task
//!
//! Assembles request lines and hands them to the controller. `stop` is
//! handled here so it takes effect while the controller is busy moving.

use defmt::*;
use embassy_stm32::usart::BufferedUartRx;
use embedded_io_async::{Read, ReadReady};

use wearm_core::intake::{CommandIntake, IntakeOutcome};
use wearm_core::queue::ByteQueue;
use wearm_core::traits::Console;
use wearm_protocol::Response;

use crate::channels::{MAILBOX, STOP};
use crate::console::UartConsole;

/// Buffer size for one UART read
const RX_BUF_SIZE: usize = 64;

/// Raw byte stage between the UART and the line intake
const QUEUE_SIZE: usize = 1024;

/// Intake task - receives bytes from the host and delivers lines
///
/// Every byte the UART already holds is moved into the queue before any
/// of them is handled, so a burst arriving while a reply is being sent
/// is absorbed here rather than in the driver's smaller ring.
#[embassy_executor::task]
pub async fn intake_task(mut rx: BufferedUartRx<'static>) {
    info!("Intake task started");

    let mut queue: ByteQueue<QUEUE_SIZE> = ByteQueue::new();
    let mut intake = CommandIntake::new();
    let mut console = UartConsole;

    loop {
        if let Err(e) = fill(&mut rx, &mut queue).await {
            warn!("UART read error: {:?}", e);
            intake.reset();
            queue.init();
            continue;
        }

        while let Ok(byte) = queue.dequeue() {
            match intake.on_byte(byte, &STOP, &MAILBOX) {
                IntakeOutcome::Pending => {}
                IntakeOutcome::Stopped => {
                    info!("Stop requested");
                    console.send(Response::StopAck).await;
                }
                IntakeOutcome::Delivered => {
                    trace!("Line delivered");
                }
                IntakeOutcome::Dropped => {
                    warn!("Controller busy, dropping line");
                    console.send(Response::Busy).await;
                }
            }
        }
    }
}

/// Wait for input, then queue everything the UART has ready
async fn fill(
    rx: &mut BufferedUartRx<'static>,
    queue: &mut ByteQueue<QUEUE_SIZE>,
) -> Result<(), embassy_stm32::usart::Error> {
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let room = (queue.capacity() - queue.len()).min(RX_BUF_SIZE);
        if room == 0 {
            warn!("Receive queue full, handling {} bytes first", queue.len());
            return Ok(());
        }

        let n = rx.read(&mut buf[..room]).await?;
        trace!("RX: {} bytes", n);
        for &byte in &buf[..n] {
            // Reads never exceed the free space
            let _ = queue.enqueue(byte);
        }

        if !rx.read_ready()? {
            return Ok(());
        }
    }
}
