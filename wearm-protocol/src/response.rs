//! Reply lines sent back to the host
//!
//! Replies are formatted with [`core::fmt::Display`] so the firmware can
//! render them straight into a fixed-size buffer. Line terminators are
//! added by the transport, not here.

use core::fmt;

/// Boot banner, printed once after the arm settles at its home pose
pub const BANNER: &[&str] = &[
    "Servo control system ready.",
    "MANUAL: id:angle:delay,id:angle:delay...",
    "STOP: stop",
    "AUTO: run <task_id>",
    "BEEP: beep",
];

/// Current logical pulse of every actuator, rendered `id:pulse:1,...`
///
/// The trailing `1` is a fixed speed field kept for host compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine<'a>(pub &'a [u16]);

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, pulse) in self.0.iter().enumerate() {
            if id > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}:1", id, pulse)?;
        }
        Ok(())
    }
}

/// One reply line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response<'a> {
    /// Request completed
    Ok,
    /// Stop recognised by the receive path
    StopAck,
    /// A completed line arrived while the previous one was still unread
    Busy,
    /// Manual move or trim with missing/non-numeric fields
    Malformed,
    /// `run` with an unknown or non-numeric task id
    InvalidTaskId,
    /// Task id exists but has no pose sequence
    UnknownTask,
    /// Task player starting a task
    ExecutingTask(u8),
    /// Task player starting waypoint `n`
    TaskStep(usize),
    /// Task player done
    TaskFinished,
    /// Motion engine honoured a stop
    MovementStopped,
    /// Echo of a manual command before it runs
    ManualEcho(&'a str),
    /// Echo of a beep request
    BeepEcho,
    /// Actuator status line
    Status(StatusLine<'a>),
    /// Static text (banner lines)
    Text(&'a str),
}

impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok => f.write_str("OK"),
            Response::StopAck => f.write_str("STOP CMD RECV"),
            Response::Busy => f.write_str("BUSY"),
            Response::Malformed => f.write_str("ERR malformed command"),
            Response::InvalidTaskId => f.write_str("Invalid task ID."),
            Response::UnknownTask => f.write_str("Unknown task."),
            Response::ExecutingTask(id) => write!(f, "Executing task: {}", id),
            Response::TaskStep(n) => write!(f, "Step {}...", n),
            Response::TaskFinished => f.write_str("Task finished."),
            Response::MovementStopped => f.write_str("Movement stopped by command."),
            Response::ManualEcho(line) => write!(f, "MANUAL CMD: {}", line),
            Response::BeepEcho => f.write_str("BEEP CMD"),
            Response::Status(status) => status.fmt(f),
            Response::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    fn render(response: Response<'_>) -> String<128> {
        let mut out = String::new();
        write!(out, "{}", response).unwrap();
        out
    }

    #[test]
    fn test_status_line_format() {
        let pulses = [1907, 1462, 1462, 1462, 1462, 1462];
        assert_eq!(
            render(Response::Status(StatusLine(&pulses))).as_str(),
            "0:1907:1,1:1462:1,2:1462:1,3:1462:1,4:1462:1,5:1462:1"
        );
    }

    #[test]
    fn test_empty_status_line() {
        assert_eq!(render(Response::Status(StatusLine(&[]))).as_str(), "");
    }

    #[test]
    fn test_fixed_replies() {
        assert_eq!(render(Response::Ok).as_str(), "OK");
        assert_eq!(render(Response::StopAck).as_str(), "STOP CMD RECV");
        assert_eq!(render(Response::InvalidTaskId).as_str(), "Invalid task ID.");
        assert_eq!(render(Response::TaskFinished).as_str(), "Task finished.");
    }

    #[test]
    fn test_parameterised_replies() {
        assert_eq!(render(Response::TaskStep(3)).as_str(), "Step 3...");
        assert_eq!(render(Response::ExecutingTask(0)).as_str(), "Executing task: 0");
        assert_eq!(
            render(Response::ManualEcho("0:90:1")).as_str(),
            "MANUAL CMD: 0:90:1"
        );
    }

    #[test]
    fn test_banner_lists_every_command() {
        assert_eq!(BANNER.len(), 5);
        assert!(BANNER.iter().any(|l| l.starts_with("STOP")));
        assert!(BANNER.iter().any(|l| l.starts_with("AUTO")));
    }
}
