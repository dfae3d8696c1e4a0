//! Channel-scoped MIDI events with absolute tick timestamps.

use serde::{Deserialize, Serialize};

/// Number of MIDI channels multiplexed in a file.
pub const CHANNEL_COUNT: usize = 16;

/// General MIDI percussion channel (channel 10, zero-based 9).
pub const PERCUSSION_CHANNEL: u8 = 9;

/// Number of distinct MIDI note values.
pub const NOTE_COUNT: usize = 128;

/// The message carried by a [`ChannelEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelEventKind {
    /// Note On: note number (0-127), velocity (1-127)
    NoteOn { note: u8, velocity: u8 },

    /// Note Off: note number (0-127), release velocity (0-127)
    NoteOff { note: u8, velocity: u8 },

    /// Program Change: program (0-127)
    ProgramChange { program: u8 },

    /// Control Change: controller (0-127), value (0-127)
    ControlChange { controller: u8, value: u8 },

    /// Pitch Bend: value (-8192 to 8191)
    PitchBend { value: i16 },

    /// Channel aftertouch
    ChannelPressure { pressure: u8 },

    /// Polyphonic aftertouch
    PolyPressure { note: u8, pressure: u8 },
}

/// A MIDI message scoped to one channel, stamped with its absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelEvent {
    /// Absolute time in ticks from the start of the track
    pub time: u64,

    /// MIDI channel (0-15)
    pub channel: u8,

    pub kind: ChannelEventKind,
}

impl ChannelEvent {
    #[inline]
    pub fn new(time: u64, channel: u8, kind: ChannelEventKind) -> Self {
        Self {
            time,
            channel,
            kind,
        }
    }

    #[inline]
    pub fn note_on(time: u64, channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(time, channel, ChannelEventKind::NoteOn { note, velocity })
    }

    #[inline]
    pub fn note_off(time: u64, channel: u8, note: u8) -> Self {
        Self::new(time, channel, ChannelEventKind::NoteOff { note, velocity: 0 })
    }

    #[inline]
    pub fn program_change(time: u64, channel: u8, program: u8) -> Self {
        Self::new(time, channel, ChannelEventKind::ProgramChange { program })
    }

    #[inline]
    pub fn control_change(time: u64, channel: u8, controller: u8, value: u8) -> Self {
        Self::new(
            time,
            channel,
            ChannelEventKind::ControlChange { controller, value },
        )
    }

    #[inline]
    pub fn is_note_on(&self) -> bool {
        matches!(self.kind, ChannelEventKind::NoteOn { .. })
    }

    #[inline]
    pub fn is_note_off(&self) -> bool {
        matches!(self.kind, ChannelEventKind::NoteOff { .. })
    }

    #[inline]
    pub fn is_program_change(&self) -> bool {
        matches!(self.kind, ChannelEventKind::ProgramChange { .. })
    }

    /// Note number for note and poly-pressure events.
    #[inline]
    pub fn note(&self) -> Option<u8> {
        match self.kind {
            ChannelEventKind::NoteOn { note, .. }
            | ChannelEventKind::NoteOff { note, .. }
            | ChannelEventKind::PolyPressure { note, .. } => Some(note),
            _ => None,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Option<u8> {
        match self.kind {
            ChannelEventKind::NoteOn { velocity, .. }
            | ChannelEventKind::NoteOff { velocity, .. } => Some(velocity),
            _ => None,
        }
    }

    #[inline]
    pub fn program(&self) -> Option<u8> {
        match self.kind {
            ChannelEventKind::ProgramChange { program } => Some(program),
            _ => None,
        }
    }
}
