//! State shared between the intake and controller tasks
//!
//! Uses embassy-sync primitives for safe async communication.

use embassy_stm32::usart::BufferedUartTx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;

use wearm_core::intake::{Mailbox, StopFlag};

/// Stop request, raised by the intake task and polled by the motion
/// engine every tick
pub static STOP: StopFlag = StopFlag::new();

/// Single-slot handoff of complete request lines to the controller
pub static MAILBOX: Mailbox<CriticalSectionRawMutex> = Channel::new();

/// Transmit half of the host UART, shared by both tasks for replies
pub static CONSOLE_TX: Mutex<CriticalSectionRawMutex, Option<BufferedUartTx<'static>>> =
    Mutex::new(None);
