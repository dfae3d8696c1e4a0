//! Centralized error type for the jamstage umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("MIDI: {0}")]
    Midi(#[from] jamstage_midi::error::Error),

    #[error("Instrument: {0}")]
    Instrument(#[from] jamstage_instruments::InstrumentError),

    #[error("Config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
