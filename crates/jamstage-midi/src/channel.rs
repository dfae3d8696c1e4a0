//! Channel demultiplexing.
//!
//! Splits the per-track event lists of a file into sixteen per-channel
//! sequences, each ordered by time. Ordering is stable: events sharing a tick
//! keep the order in which they were read (earlier tracks first, then file
//! order within a track). Program-change and note-off resolution downstream
//! rely on that tie-break.

use crate::event::{ChannelEvent, CHANNEL_COUNT};
use crate::file::{MidiFile, MidiTrack};
use tracing::{debug, warn};

/// Per-channel event sequences, indexed by channel number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelStreams {
    channels: [Vec<ChannelEvent>; CHANNEL_COUNT],
}

impl ChannelStreams {
    /// Demultiplex tracks into channels; absent tracks are skipped.
    pub fn demultiplex(tracks: &[Option<MidiTrack>]) -> Self {
        Self::from_events(tracks.iter().flatten().flat_map(|track| track.events.iter().copied()))
    }

    pub fn from_file(file: &MidiFile) -> Self {
        Self::demultiplex(&file.tracks)
    }

    /// Route a flat event stream to channels and stable-sort each by time.
    pub fn from_events(events: impl IntoIterator<Item = ChannelEvent>) -> Self {
        let mut streams = Self::default();

        for event in events {
            match streams.channels.get_mut(event.channel as usize) {
                Some(channel) => channel.push(event),
                None => warn!(
                    "Dropping event on invalid channel {} at tick {}",
                    event.channel, event.time
                ),
            }
        }

        for channel in streams.channels.iter_mut() {
            // sort_by_key is stable
            channel.sort_by_key(|e| e.time);
        }

        debug!(
            "Demultiplexed {} events into {} active channels",
            streams.channels.iter().map(Vec::len).sum::<usize>(),
            streams.channels.iter().filter(|c| !c.is_empty()).count()
        );

        streams
    }

    /// Events of one channel; empty for out-of-range channels.
    pub fn channel(&self, channel: u8) -> &[ChannelEvent] {
        self.channels
            .get(channel as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the channel contains at least one note-on. Channels without
    /// one produce no instruments.
    pub fn has_note_on(&self, channel: u8) -> bool {
        self.channel(channel).iter().any(ChannelEvent::is_note_on)
    }

    /// `(channel, events)` pairs in channel order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[ChannelEvent])> {
        self.channels
            .iter()
            .enumerate()
            .map(|(i, events)| (i as u8, events.as_slice()))
    }

    pub fn into_channels(self) -> [Vec<ChannelEvent>; CHANNEL_COUNT] {
        self.channels
    }

    pub fn event_count(&self) -> usize {
        self.channels.iter().map(Vec::len).sum()
    }
}
