//! Line assembly and the single-slot mailbox
//!
//! [`CommandIntake`] runs in the receive context one byte at a time and must
//! return quickly. It recognises `stop` on its own so cancellation never
//! waits on the controller; every other complete line is handed over
//! through a one-slot [`Mailbox`].

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;

use wearm_protocol::{ParseError, STOP_KEYWORD};

use super::StopFlag;

/// Longest line kept; further bytes are dropped until the terminator
pub const LINE_CAPACITY: usize = 127;

/// Single-slot handoff from the receive path to the controller
///
/// A non-empty channel is the "line ready" flag.
pub type Mailbox<M> = Channel<M, CommandLine, 1>;

/// One complete request line, without its terminator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandLine {
    bytes: Vec<u8, LINE_CAPACITY>,
}

impl CommandLine {
    /// Build a line from text, truncating at [`LINE_CAPACITY`]
    pub fn from_text(text: &str) -> Self {
        let bytes = text.as_bytes();
        let len = bytes.len().min(LINE_CAPACITY);
        let mut line = Self::default();
        // Cannot fail: len is bounded by capacity
        let _ = line.bytes.extend_from_slice(&bytes[..len]);
        line
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> Result<&str, ParseError> {
        core::str::from_utf8(&self.bytes).map_err(|_| ParseError::InvalidEncoding)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_stop(&self) -> bool {
        self.bytes.as_slice() == STOP_KEYWORD.as_bytes()
    }
}

/// Result of feeding one byte
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntakeEvent {
    /// `stop` line completed
    Stop,
    /// Any other non-empty line completed
    Line(CommandLine),
}

/// What [`CommandIntake::on_byte`] did with a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntakeOutcome {
    /// Byte accumulated or ignored, nothing completed
    Pending,
    /// Stop flag raised; caller should acknowledge
    Stopped,
    /// Line placed in the mailbox
    Delivered,
    /// Line completed while the mailbox still held an unread one; the new
    /// line was discarded
    Dropped,
}

/// Byte-at-a-time line accumulator
#[derive(Debug, Clone, Default)]
pub struct CommandIntake {
    accumulator: Vec<u8, LINE_CAPACITY>,
}

impl CommandIntake {
    pub const fn new() -> Self {
        Self {
            accumulator: Vec::new(),
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.accumulator.clear();
    }

    /// Bytes accumulated for the line in progress
    pub fn pending(&self) -> usize {
        self.accumulator.len()
    }

    /// Feed one byte
    ///
    /// `\r` and `\n` terminate a line; a terminator with nothing accumulated
    /// is ignored, so `\r\n` yields one line. Bytes past [`LINE_CAPACITY`]
    /// are dropped silently.
    pub fn feed(&mut self, byte: u8) -> Option<IntakeEvent> {
        if byte == b'\r' || byte == b'\n' {
            if self.accumulator.is_empty() {
                return None;
            }

            let line = CommandLine {
                bytes: core::mem::take(&mut self.accumulator),
            };
            if line.is_stop() {
                return Some(IntakeEvent::Stop);
            }
            return Some(IntakeEvent::Line(line));
        }

        // Overflow: excess bytes dropped until the terminator
        let _ = self.accumulator.push(byte);
        None
    }

    /// Feed one byte and apply the result to the shared state
    ///
    /// `stop` raises the flag immediately. Other lines go into the
    /// mailbox only if it is empty; an unread line is never overwritten.
    pub fn on_byte<M: RawMutex>(
        &mut self,
        byte: u8,
        stop: &StopFlag,
        mailbox: &Mailbox<M>,
    ) -> IntakeOutcome {
        match self.feed(byte) {
            None => IntakeOutcome::Pending,
            Some(IntakeEvent::Stop) => {
                stop.request();
                IntakeOutcome::Stopped
            }
            Some(IntakeEvent::Line(line)) => match mailbox.try_send(line) {
                Ok(()) => IntakeOutcome::Delivered,
                Err(_) => IntakeOutcome::Dropped,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn feed_all(intake: &mut CommandIntake, bytes: &[u8]) -> Option<IntakeEvent> {
        let mut last = None;
        for &b in bytes {
            if let Some(event) = intake.feed(b) {
                last = Some(event);
            }
        }
        last
    }

    #[test]
    fn test_line_assembly() {
        let mut intake = CommandIntake::new();
        let event = feed_all(&mut intake, b"0:90:1\r\n");
        assert_eq!(
            event,
            Some(IntakeEvent::Line(CommandLine::from_text("0:90:1")))
        );
        assert_eq!(intake.pending(), 0);
    }

    #[test]
    fn test_empty_terminator_ignored() {
        let mut intake = CommandIntake::new();
        assert_eq!(intake.feed(b'\n'), None);
        assert_eq!(intake.feed(b'\r'), None);
    }

    #[test]
    fn test_stop_recognised() {
        let mut intake = CommandIntake::new();
        assert_eq!(feed_all(&mut intake, b"stop\n"), Some(IntakeEvent::Stop));
        // Not a prefix match
        assert!(matches!(
            feed_all(&mut intake, b"stopx\n"),
            Some(IntakeEvent::Line(_))
        ));
    }

    #[test]
    fn test_overflow_truncates() {
        let mut intake = CommandIntake::new();
        for _ in 0..(LINE_CAPACITY + 40) {
            assert_eq!(intake.feed(b'a'), None);
        }
        let Some(IntakeEvent::Line(line)) = intake.feed(b'\n') else {
            panic!("expected line");
        };
        assert_eq!(line.len(), LINE_CAPACITY);

        // Next line starts clean
        let Some(IntakeEvent::Line(next)) = feed_all(&mut intake, b"beep\n") else {
            panic!("expected line");
        };
        assert_eq!(next.as_str(), Ok("beep"));
    }

    #[test]
    fn test_on_byte_delivers_and_stops() {
        let mailbox: Mailbox<NoopRawMutex> = Channel::new();
        let stop = StopFlag::new();
        let mut intake = CommandIntake::new();

        for &b in b"beep" {
            assert_eq!(intake.on_byte(b, &stop, &mailbox), IntakeOutcome::Pending);
        }
        assert_eq!(
            intake.on_byte(b'\n', &stop, &mailbox),
            IntakeOutcome::Delivered
        );

        for &b in b"stop" {
            intake.on_byte(b, &stop, &mailbox);
        }
        assert_eq!(
            intake.on_byte(b'\n', &stop, &mailbox),
            IntakeOutcome::Stopped
        );
        assert!(stop.is_requested());

        let line = mailbox.try_receive().unwrap();
        assert_eq!(line.as_str(), Ok("beep"));
        assert!(mailbox.try_receive().is_err());
    }

    #[test]
    fn test_unread_line_not_overwritten() {
        let mailbox: Mailbox<NoopRawMutex> = Channel::new();
        let stop = StopFlag::new();
        let mut intake = CommandIntake::new();

        for &b in b"run 0\n" {
            intake.on_byte(b, &stop, &mailbox);
        }
        let mut last = IntakeOutcome::Pending;
        for &b in b"beep\n" {
            last = intake.on_byte(b, &stop, &mailbox);
        }
        assert_eq!(last, IntakeOutcome::Dropped);

        // Stop still gets through while the slot is occupied
        let mut last = IntakeOutcome::Pending;
        for &b in b"stop\r" {
            last = intake.on_byte(b, &stop, &mailbox);
        }
        assert_eq!(last, IntakeOutcome::Stopped);

        assert_eq!(mailbox.try_receive().unwrap().as_str(), Ok("run 0"));
    }
}
