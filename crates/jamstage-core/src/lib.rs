//! Instrument assignment engine.
//!
//! Given one channel's time-ordered events, decides which General MIDI
//! program owns each event:
//!
//! - [`ProgramTimeline`] cleans the channel's program changes into segments,
//! - [`resolve`] partitions the events between those segments' programs,
//!   linking every note-off to the program that played its note-on.
//!
//! # Example
//!
//! ```ignore
//! use jamstage_core::assign_channel;
//!
//! let resolution = assign_channel(streams.channel(0));
//! for assignment in &resolution.assignments {
//!     println!("program {}: {} events", assignment.program, assignment.events.len());
//! }
//! ```

pub mod program;
pub mod resolver;

pub use program::{ProgramSegment, ProgramTimeline, DEFAULT_PROGRAM};
pub use resolver::{resolve, InstrumentAssignment, Resolution};

use jamstage_midi::ChannelEvent;

/// Normalize the channel's program changes and resolve note ownership.
pub fn assign_channel(events: &[ChannelEvent]) -> Resolution {
    let timeline = ProgramTimeline::from_events(events);
    resolve(events, &timeline)
}
