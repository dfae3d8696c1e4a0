//! Virtual instruments for jamstage.
//!
//! Turns a resolved program assignment into something the stage can draw:
//!
//! - [`kind_for_program`] looks up the General MIDI program table,
//! - [`InstrumentFactory`] builds [`InstrumentSlot`]s, asking a
//!   [`ResourceProvider`] to prepare each instrument first,
//! - [`Instrument::tick`] derives per-frame state (sounding notes, strikes,
//!   visibility) from the instrument's [`NotePeriod`]s.

pub mod drum;
pub mod error;
pub mod factory;
pub mod instrument;
pub mod kind;
pub mod period;

pub use drum::DrumPiece;
pub use error::{InstrumentError, Result};
pub use factory::{kind_for_program, InstrumentFactory, NoResources, ResourceProvider};
pub use instrument::{Instrument, InstrumentSlot, VisibilityWindow};
pub use kind::{
    BassGuitarType, GuitarType, InstrumentKind, KeyboardSkin, MalletType, PipeSkin, PlayingStyle,
    TrumpetType,
};
pub use period::{note_periods, NotePeriod};
