//! Error types for instrument construction.

use crate::kind::InstrumentKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstrumentError {
    #[error("Resources for {kind} unavailable: {reason}")]
    ResourceUnavailable { kind: InstrumentKind, reason: String },

    #[error("Invalid channel: {0} (expected 0-15)")]
    InvalidChannel(u8),
}

pub type Result<T> = std::result::Result<T, InstrumentError>;
