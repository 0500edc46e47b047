#![allow(clippy::uninlined_format_args)]

//! Error related data structures to be shared and used.
//!
//! This module contains the [`Error`] enum, used to represent the
//! small set of fatal conditions the emulator core can run into.

use std::fmt::{self, Display, Formatter};

/// Top level enum for error handling within the emulator core.
///
/// Runtime execution of a well-formed ROM never produces one of these;
/// they only surface at load time or when an opcode byte has no handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The ROM data does not fit the 32 KiB the core maps at 0x0000.
    RomSize,
    /// The CPU fetched a byte with no associated instruction handler.
    UnknownOpcode(u8, u16),
    /// Catch-all for host-side failures (I/O, window/texture init, ...).
    CustomError(String),
}

impl Error {
    pub fn description(&self) -> String {
        match self {
            Error::RomSize => String::from("Invalid ROM size"),
            Error::UnknownOpcode(opcode, pc) => {
                format!("Unknown opcode 0x{:02x} at 0x{:04x}", opcode, pc)
            }
            Error::CustomError(message) => String::from(message),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
