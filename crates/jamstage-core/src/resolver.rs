//! Note ownership.
//!
//! Splits a channel's events between the programs of its timeline. Every
//! event except a note-off belongs to the program active at its tick. A
//! note-off follows its note-on instead: a program change may land between
//! the two, and the note must be released by the instrument that started it.

use crate::program::ProgramTimeline;
use jamstage_midi::{ChannelEvent, ChannelEventKind, NOTE_COUNT};
use serde::Serialize;
use tracing::debug;

/// The events one program on one channel must animate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentAssignment {
    pub program: u8,
    /// Events in source order.
    pub events: Vec<ChannelEvent>,
}

impl InstrumentAssignment {
    pub fn new(program: u8) -> Self {
        Self {
            program,
            events: Vec::new(),
        }
    }
}

/// Resolver output for one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// One assignment per distinct program, in order of first appearance
    /// on the timeline.
    pub assignments: Vec<InstrumentAssignment>,

    /// Note-offs with no preceding note-on for their note; skipped.
    pub orphaned: Vec<ChannelEvent>,
}

impl Resolution {
    /// Total events placed in assignments.
    pub fn assigned_count(&self) -> usize {
        self.assignments.iter().map(|a| a.events.len()).sum()
    }
}

/// Assignment bucket of the latest note-on, per note number.
struct NoteOwners([Option<usize>; NOTE_COUNT]);

impl NoteOwners {
    fn new() -> Self {
        Self([None; NOTE_COUNT])
    }

    #[inline]
    fn claim(&mut self, note: u8, bucket: usize) {
        if let Some(owner) = self.0.get_mut(note as usize) {
            *owner = Some(bucket);
        }
    }

    #[inline]
    fn owner(&self, note: u8) -> Option<usize> {
        self.0.get(note as usize).copied().flatten()
    }
}

/// Partition `events` (one channel, stable time order) between the programs
/// of `timeline`.
///
/// Segments that share a program number feed the same assignment, so a
/// channel alternating between two programs yields two assignments rather
/// than one per switch.
pub fn resolve(events: &[ChannelEvent], timeline: &ProgramTimeline) -> Resolution {
    if let [segment] = timeline.segments() {
        return Resolution {
            assignments: vec![InstrumentAssignment {
                program: segment.program,
                events: events.to_vec(),
            }],
            orphaned: Vec::new(),
        };
    }

    let mut assignments: Vec<InstrumentAssignment> = Vec::new();
    let bucket_of_segment: Vec<usize> = timeline
        .segments()
        .iter()
        .map(|segment| {
            match assignments
                .iter()
                .position(|assignment| assignment.program == segment.program)
            {
                Some(bucket) => bucket,
                None => {
                    assignments.push(InstrumentAssignment::new(segment.program));
                    assignments.len() - 1
                }
            }
        })
        .collect();

    let mut owners = NoteOwners::new();
    let mut orphaned = Vec::new();

    for event in events {
        match event.kind {
            ChannelEventKind::NoteOff { note, .. } => match owners.owner(note) {
                Some(bucket) => assignments[bucket].events.push(*event),
                None => {
                    debug!(
                        "Skipping note-off without note-on: channel {}, note {}, tick {}",
                        event.channel, note, event.time
                    );
                    orphaned.push(*event);
                }
            },
            kind => {
                let bucket = bucket_of_segment[timeline.segment_index_at(event.time)];
                assignments[bucket].events.push(*event);

                if let ChannelEventKind::NoteOn { note, .. } = kind {
                    owners.claim(note, bucket);
                }
            }
        }
    }

    debug!(
        "Resolved {} events over {} segments into {} assignments ({} orphaned)",
        events.len(),
        timeline.len(),
        assignments.len(),
        orphaned.len()
    );

    Resolution {
        assignments,
        orphaned,
    }
}
