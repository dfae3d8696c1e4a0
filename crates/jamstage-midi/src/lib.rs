//! MIDI input for jamstage.
//!
//! Loads Standard MIDI Files into absolute-tick channel events and splits
//! them into per-channel streams for instrument assignment.
//!
//! # Example
//!
//! ```ignore
//! use jamstage_midi::{ChannelStreams, MidiFile};
//!
//! let file = MidiFile::load("song.mid")?;
//! let streams = ChannelStreams::from_file(&file);
//!
//! for (channel, events) in streams.iter() {
//!     println!("channel {channel}: {} events", events.len());
//! }
//! ```

pub mod error;
pub use error::{Error, Result};

pub(crate) mod channel;
pub(crate) mod event;
pub(crate) mod file;
pub(crate) mod tempo;

pub use channel::ChannelStreams;
pub use event::{ChannelEvent, ChannelEventKind, CHANNEL_COUNT, NOTE_COUNT, PERCUSSION_CHANNEL};
pub use file::{MidiFile, MidiTrack};
pub use tempo::{TempoMap, DEFAULT_MICROS_PER_BEAT};
