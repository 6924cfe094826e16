//! Wearm serial text protocol
//!
//! This crate defines the line-based ASCII protocol spoken between the host
//! (desktop companion or a plain terminal) and the arm controller.
//!
//! # Protocol Overview
//!
//! Every request is one line terminated by `\r` or `\n`:
//! ```text
//! id:angle:delay[,id:angle:delay...]   manual multi-joint move
//! run <task_id>                        play a stored pose sequence
//! trim <id> <offset>                   static pulse trim for one joint
//! beep                                 pulse the buzzer
//! stop                                 cancel the motion in progress
//! ```
//!
//! Replies are plain text lines. A move or task ends with the status line
//! `0:pulse:1,1:pulse:1,...` followed by `OK`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod response;

pub use command::{Command, JointMove, MoveList, ParseError, MAX_MOVES, STOP_KEYWORD};
pub use response::{Response, StatusLine, BANNER};
