//! Request parsing
//!
//! Turns one received line into a [`Command`]. Parsing is strict: a manual
//! move whose groups are not all `id:angle:delay` integer triples is
//! rejected as a whole instead of being half-applied. Values too large for
//! their field saturate instead; range checks happen downstream.

use heapless::Vec;

/// Maximum `id:angle:delay` groups in one manual move
pub const MAX_MOVES: usize = 16;

/// Keyword for the priority stop command
pub const STOP_KEYWORD: &str = "stop";

/// Errors that can occur while parsing a request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line is empty
    Empty,
    /// Line is not valid UTF-8/ASCII
    InvalidEncoding,
    /// `run` argument is not an integer
    BadTaskId,
    /// A numeric field is missing or not a number
    Malformed,
    /// More groups than [`MAX_MOVES`]
    TooManyMoves,
}

/// One joint target inside a manual move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointMove {
    /// Actuator index (not range-checked here)
    pub id: u16,
    /// Target angle in degrees
    pub angle: u16,
    /// Ticks per pulse step (0 is normalised to 1 downstream)
    pub rate: u16,
}

impl JointMove {
    pub const fn new(id: u16, angle: u16, rate: u16) -> Self {
        Self { id, angle, rate }
    }
}

/// Ordered list of joint targets applied together
pub type MoveList = Vec<JointMove, MAX_MOVES>;

/// A parsed request
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Manual multi-joint move
    Move(MoveList),
    /// Play a stored task by index (range-checked by the task player)
    Run(i32),
    /// Set the static pulse trim of one joint
    Trim { id: u16, offset: i16 },
    /// Pulse the buzzer
    Beep,
    /// Cancel motion in progress
    Stop,
}

impl Command {
    /// Parse a request line
    ///
    /// The line must not contain its terminator.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        if line == STOP_KEYWORD {
            return Ok(Command::Stop);
        }

        if line == "beep" {
            return Ok(Command::Beep);
        }

        if let Some(arg) = line.strip_prefix("run ") {
            let task = arg.trim().parse::<i32>().map_err(|_| ParseError::BadTaskId)?;
            return Ok(Command::Run(task));
        }

        if let Some(args) = line.strip_prefix("trim ") {
            let mut fields = args.split_whitespace();
            let id = saturate_u16(parse_unsigned(fields.next())?);
            let offset = parse_offset(fields.next())?;
            if fields.next().is_some() {
                return Err(ParseError::Malformed);
            }
            return Ok(Command::Trim { id, offset });
        }

        parse_moves(line).map(Command::Move)
    }

    /// Parse raw line bytes
    pub fn parse_bytes(line: &[u8]) -> Result<Self, ParseError> {
        let text = core::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;
        Self::parse(text)
    }
}

/// Parse a comma-separated list of `id:angle:delay` groups
///
/// Empty groups (`,,` or a trailing comma) are skipped.
pub fn parse_moves(line: &str) -> Result<MoveList, ParseError> {
    let mut moves = MoveList::new();

    for group in line.split(',').filter(|g| !g.trim().is_empty()) {
        let mut fields = group.trim().split(':');
        let id = saturate_u16(parse_unsigned(fields.next())?);
        let angle = saturate_u16(parse_unsigned(fields.next())?);
        let rate = saturate_u16(parse_unsigned(fields.next())?);
        if fields.next().is_some() {
            return Err(ParseError::Malformed);
        }

        moves
            .push(JointMove::new(id, angle, rate))
            .map_err(|_| ParseError::TooManyMoves)?;
    }

    if moves.is_empty() {
        return Err(ParseError::Malformed);
    }

    Ok(moves)
}

/// Parse a run of decimal digits, saturating at `u32::MAX`
fn parse_unsigned(field: Option<&str>) -> Result<u32, ParseError> {
    let digits = field.map(str::trim).ok_or(ParseError::Malformed)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::Malformed);
    }

    Ok(digits.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    }))
}

/// Parse an optionally negative trim offset, saturating into `i16`
fn parse_offset(field: Option<&str>) -> Result<i16, ParseError> {
    let field = field.map(str::trim).ok_or(ParseError::Malformed)?;
    match field.strip_prefix('-') {
        Some(magnitude) => {
            let value = parse_unsigned(Some(magnitude))?;
            Ok(i16::try_from(value).map_or(i16::MIN, |v| -v))
        }
        None => {
            let value = parse_unsigned(Some(field))?;
            Ok(i16::try_from(value).unwrap_or(i16::MAX))
        }
    }
}

fn saturate_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
