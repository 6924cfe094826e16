//! Reply writer on the host UART

use core::fmt::Write as _;

use defmt::warn;
use embedded_io_async::Write;
use heapless::String;

use wearm_core::traits::Console;
use wearm_protocol::Response;

use crate::channels::CONSOLE_TX;

/// Longest rendered reply; a manual echo of a full line fits
const REPLY_BUF_SIZE: usize = 160;

/// Handle to the shared UART transmitter
///
/// Each reply takes the transmit lock only for its own line, so the
/// intake task can acknowledge a stop while a motion is running.
pub struct UartConsole;

impl Console for UartConsole {
    async fn send(&mut self, response: Response<'_>) {
        let mut line: String<REPLY_BUF_SIZE> = String::new();
        if write!(line, "{}", response).is_err() {
            warn!("Reply truncated");
        }
        let _ = line.push_str("\r\n");

        let mut tx = CONSOLE_TX.lock().await;
        let Some(tx) = tx.as_mut() else {
            warn!("Console not ready, dropping reply");
            return;
        };

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send reply: {:?}", e);
        }
    }
}
