//! # jamstage - MIDI-driven virtual band
//!
//! Reads a Standard MIDI File and decides which on-stage instrument plays
//! every event.
//!
//! ## Architecture
//!
//! jamstage is an umbrella crate that coordinates:
//! - **jamstage-midi** - File loading, tempo map, per-channel demultiplexing
//! - **jamstage-core** - Program timelines and note ownership
//! - **jamstage-instruments** - General MIDI program table, instrument factory,
//!   per-frame note state
//!
//! ## Quick Start
//!
//! ```ignore
//! use jamstage::prelude::*;
//!
//! let file = MidiFile::load("song.mid")?;
//! let mut scene = Scene::builder().build(&file)?;
//!
//! for slot in scene.slots() {
//!     println!("channel {}: {:?}", slot.channel(), slot.kind());
//! }
//!
//! scene.tick(3.0, 1.0 / 60.0);
//! let guitars = scene.count_visible(|k| matches!(k, InstrumentKind::Guitar(_)));
//! ```

mod builder;
mod config;
mod error;
mod scene;

pub use builder::SceneBuilder;
pub use config::SceneConfig;
pub use error::{Error, Result};
pub use scene::{Scene, SceneReport, SlotFailure};

/// Re-export of jamstage-midi for direct access
pub use jamstage_midi as midi;

/// Re-export of jamstage-core for direct access
pub use jamstage_core as core;

/// Re-export of jamstage-instruments for direct access
pub use jamstage_instruments as instruments;

pub use jamstage_core::{assign_channel, InstrumentAssignment, ProgramTimeline, Resolution};
pub use jamstage_instruments::{
    kind_for_program, DrumPiece, Instrument, InstrumentError, InstrumentFactory, InstrumentKind,
    InstrumentSlot, NoResources, NotePeriod, ResourceProvider, VisibilityWindow,
};
pub use jamstage_midi::{ChannelEvent, ChannelEventKind, ChannelStreams, MidiFile, TempoMap};

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        ChannelEvent, ChannelStreams, Error, Instrument, InstrumentKind, InstrumentSlot,
        MidiFile, Result, Scene, SceneBuilder, SceneConfig,
    };
}
