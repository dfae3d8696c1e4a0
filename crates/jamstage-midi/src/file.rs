//! MIDI File I/O
//!
//! Standard MIDI File parsing using the `midly` crate. Each track is converted
//! to absolute-tick [`ChannelEvent`]s; tempo meta events feed the [`TempoMap`].
//!
//! Parsing is tolerant of damaged tracks: a track chunk that cannot be read is
//! kept as an absent (`None`) entry, and an event error part-way through a
//! track truncates that track at the last good event.

use crate::error::{Error, Result};
use crate::event::{ChannelEvent, ChannelEventKind};
use crate::tempo::TempoMap;
use midly::{EventIter, MetaMessage, MidiMessage, Timing, TrackEventKind};
use std::path::Path;
use tracing::{debug, warn};

/// One track's channel events in file order, with absolute tick times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MidiTrack {
    pub events: Vec<ChannelEvent>,
}

impl MidiTrack {
    pub fn new(events: Vec<ChannelEvent>) -> Self {
        Self { events }
    }

    /// Tick of the last event, or 0 for an empty track.
    pub fn end_tick(&self) -> u64 {
        self.events.last().map_or(0, |e| e.time)
    }
}

impl From<Vec<ChannelEvent>> for MidiTrack {
    fn from(events: Vec<ChannelEvent>) -> Self {
        Self::new(events)
    }
}

/// A parsed MIDI file, ready for channel demultiplexing.
#[derive(Debug, Clone, PartialEq)]
pub struct MidiFile {
    /// Tracks in file order; `None` marks a track that could not be read.
    pub tracks: Vec<Option<MidiTrack>>,

    tempo_map: TempoMap,
}

impl MidiFile {
    /// Assemble a file from already-decoded tracks.
    pub fn new(tracks: Vec<Option<MidiTrack>>, tempo_map: TempoMap) -> Self {
        Self { tracks, tempo_map }
    }

    /// Load and parse a MIDI file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::parse(&data)
    }

    /// Parse MIDI file from bytes
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (header, track_iter) = midly::parse(data)?;

        let ticks_per_beat = match header.timing {
            Timing::Metrical(tpb) => tpb.as_int(),
            Timing::Timecode(_, _) => {
                return Err(Error::UnsupportedTiming);
            }
        };

        let mut tracks = Vec::new();
        let mut tempo_changes = Vec::new();

        for (index, track) in track_iter.enumerate() {
            match track {
                Ok(events) => {
                    tracks.push(Some(Self::parse_track(index, events, &mut tempo_changes)));
                }
                Err(e) => {
                    warn!("Skipping unreadable MIDI track {}: {}", index, e);
                    tracks.push(None);
                }
            }
        }

        let tempo_map = TempoMap::new(ticks_per_beat, tempo_changes);

        debug!(
            "Parsed MIDI file: {} tracks ({} readable), {} ticks per beat, {} tempo regions",
            tracks.len(),
            tracks.iter().flatten().count(),
            ticks_per_beat,
            tempo_map.len()
        );

        Ok(Self { tracks, tempo_map })
    }

    /// Parse a single track into timed events, collecting tempo changes on the way.
    fn parse_track(
        index: usize,
        events: EventIter<'_>,
        tempo_changes: &mut Vec<(u64, u32)>,
    ) -> MidiTrack {
        let mut track = MidiTrack::default();
        let mut current_tick = 0u64;

        for event in events {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    warn!(
                        "Truncating MIDI track {} after {} events: {}",
                        index,
                        track.events.len(),
                        e
                    );
                    break;
                }
            };

            current_tick += event.delta.as_int() as u64;

            match event.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => {
                    tempo_changes.push((current_tick, tempo.as_int()));
                }
                kind => {
                    if let Some(channel_event) = Self::convert_event(&kind, current_tick) {
                        track.events.push(channel_event);
                    }
                }
            }
        }

        track
    }

    /// Convert a midly event to a [`ChannelEvent`]; meta and sysex events yield `None`.
    fn convert_event(kind: &TrackEventKind, time: u64) -> Option<ChannelEvent> {
        let TrackEventKind::Midi { channel, message } = kind else {
            return None;
        };

        let kind = match *message {
            MidiMessage::NoteOn { key, vel } => {
                // Note: velocity 0 is treated as Note Off
                if vel.as_int() == 0 {
                    ChannelEventKind::NoteOff {
                        note: key.as_int(),
                        velocity: 0,
                    }
                } else {
                    ChannelEventKind::NoteOn {
                        note: key.as_int(),
                        velocity: vel.as_int(),
                    }
                }
            }
            MidiMessage::NoteOff { key, vel } => ChannelEventKind::NoteOff {
                note: key.as_int(),
                velocity: vel.as_int(),
            },
            MidiMessage::Controller { controller, value } => ChannelEventKind::ControlChange {
                controller: controller.as_int(),
                value: value.as_int(),
            },
            MidiMessage::ProgramChange { program } => ChannelEventKind::ProgramChange {
                program: program.as_int(),
            },
            MidiMessage::PitchBend { bend } => ChannelEventKind::PitchBend {
                value: bend.as_int(),
            },
            MidiMessage::ChannelAftertouch { vel } => ChannelEventKind::ChannelPressure {
                pressure: vel.as_int(),
            },
            MidiMessage::Aftertouch { key, vel } => ChannelEventKind::PolyPressure {
                note: key.as_int(),
                pressure: vel.as_int(),
            },
        };

        Some(ChannelEvent::new(time, channel.as_int(), kind))
    }

    #[inline]
    pub fn tempo_map(&self) -> &TempoMap {
        &self.tempo_map
    }

    #[inline]
    pub fn ticks_per_beat(&self) -> u16 {
        self.tempo_map.ticks_per_beat()
    }

    #[inline]
    pub fn tick_to_seconds(&self, tick: u64) -> f64 {
        self.tempo_map.tick_to_seconds(tick)
    }

    /// Tick of the latest event across all readable tracks.
    pub fn end_tick(&self) -> u64 {
        self.tracks
            .iter()
            .flatten()
            .map(MidiTrack::end_tick)
            .max()
            .unwrap_or(0)
    }

    pub fn duration_seconds(&self) -> f64 {
        self.tick_to_seconds(self.end_tick())
    }
}
