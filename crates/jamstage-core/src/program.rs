//! Program timelines.
//!
//! A channel's program changes are cleaned into a gap-free list of segments,
//! each active from its start tick until the next segment begins.

use jamstage_midi::ChannelEvent;
use serde::{Deserialize, Serialize};

/// Program assumed when a channel does not select one at tick 0
/// (General MIDI: Acoustic Grand Piano).
pub const DEFAULT_PROGRAM: u8 = 0;

/// A program that becomes active at `start` and stays active until the
/// next segment's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramSegment {
    pub program: u8,
    pub start: u64,
}

impl ProgramSegment {
    #[inline]
    pub const fn new(program: u8, start: u64) -> Self {
        Self { program, start }
    }
}

/// Normalized program segments of one channel.
///
/// Never empty, starts at tick 0, strictly increasing by start, and no two
/// adjacent segments share a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramTimeline {
    segments: Vec<ProgramSegment>,
}

impl ProgramTimeline {
    /// Build the timeline from a channel's time-ordered events.
    pub fn from_events(events: &[ChannelEvent]) -> Self {
        Self::normalize(events.iter().filter_map(|event| {
            event
                .program()
                .map(|program| ProgramSegment::new(program, event.time))
        }))
    }

    /// Clean a list of program changes, given in source order.
    ///
    /// Cleanup runs in this order:
    /// 1. several changes at one tick keep only the last one,
    /// 2. a change repeating the previous program is dropped, keeping the
    ///    earlier start,
    /// 3. if nothing starts at tick 0, [`DEFAULT_PROGRAM`] is inserted there
    ///    (absorbing a directly following change to the same program).
    ///
    /// So `[t=0 p=43], [t=0 p=24], [t=0 p=69]` becomes `[t=0 p=69]`, and
    /// `[t=0 p=50], [t=128 p=50], [t=3000 p=50]` becomes `[t=0 p=50]`.
    pub fn normalize(changes: impl IntoIterator<Item = ProgramSegment>) -> Self {
        let mut changes: Vec<ProgramSegment> = changes.into_iter().collect();
        // sort_by_key is stable, so this only matters for unsorted input
        changes.sort_by_key(|segment| segment.start);

        let mut segments = collapse_same_time(changes);
        segments.dedup_by(|current, previous| current.program == previous.program);

        if segments.first().map_or(true, |segment| segment.start != 0) {
            segments.insert(0, ProgramSegment::new(DEFAULT_PROGRAM, 0));
            segments.dedup_by(|current, previous| current.program == previous.program);
        }

        Self { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[ProgramSegment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true for a normalized timeline.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the segment whose interval `[start, next start)` contains `time`.
    #[inline]
    pub fn segment_index_at(&self, time: u64) -> usize {
        // segments[0].start == 0, so every time has a segment
        self.segments
            .partition_point(|segment| segment.start <= time)
            .saturating_sub(1)
    }

    #[inline]
    pub fn segment_at(&self, time: u64) -> ProgramSegment {
        self.segments[self.segment_index_at(time)]
    }

    /// Exclusive end of a segment, `None` for the last one.
    pub fn segment_end(&self, index: usize) -> Option<u64> {
        self.segments.get(index + 1).map(|next| next.start)
    }
}

/// Keep the last of several changes sharing a start tick.
fn collapse_same_time(changes: Vec<ProgramSegment>) -> Vec<ProgramSegment> {
    let mut collapsed: Vec<ProgramSegment> = Vec::with_capacity(changes.len());

    for change in changes {
        match collapsed.last_mut() {
            Some(last) if last.start == change.start => *last = change,
            _ => collapsed.push(change),
        }
    }

    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: u64, program: u8) -> ProgramSegment {
        ProgramSegment::new(program, start)
    }

    #[test]
    fn test_same_time_keeps_last() {
        let timeline = ProgramTimeline::normalize([seg(0, 43), seg(0, 24), seg(0, 69)]);
        assert_eq!(timeline.segments(), &[seg(0, 69)]);
    }

    #[test]
    fn test_adjacent_same_program_keeps_first() {
        let timeline = ProgramTimeline::normalize([seg(0, 50), seg(128, 50), seg(3000, 50)]);
        assert_eq!(timeline.segments(), &[seg(0, 50)]);
    }

    #[test]
    fn test_collapse_order() {
        let timeline = ProgramTimeline::normalize([seg(0, 5), seg(0, 9), seg(0, 5)]);
        assert_eq!(timeline.segments(), &[seg(0, 5)]);

        // same-time first leaves [0,9],[10,9], which then merges; running the
        // value pass first would keep two segments for program 9
        let timeline = ProgramTimeline::normalize([seg(0, 9), seg(10, 5), seg(10, 9)]);
        assert_eq!(timeline.segments(), &[seg(0, 9)]);
    }

    #[test]
    fn test_bootstrap_inserted() {
        let timeline = ProgramTimeline::normalize([seg(5, 12)]);
        assert_eq!(timeline.segments(), &[seg(0, 0), seg(5, 12)]);
    }

    #[test]
    fn test_bootstrap_for_empty() {
        let timeline = ProgramTimeline::normalize(Vec::new());
        assert_eq!(timeline.segments(), &[seg(0, DEFAULT_PROGRAM)]);
        assert_eq!(timeline.len(), 1);
        assert!(!timeline.is_empty());
    }

    #[test]
    fn test_bootstrap_absorbs_following_default() {
        let timeline = ProgramTimeline::normalize([seg(5, 0), seg(9, 30)]);
        assert_eq!(timeline.segments(), &[seg(0, 0), seg(9, 30)]);
    }

    #[test]
    fn test_from_events_ignores_other_kinds() {
        let events = [
            ChannelEvent::control_change(0, 1, 7, 100),
            ChannelEvent::note_on(0, 1, 60, 100),
            ChannelEvent::program_change(20, 1, 40),
            ChannelEvent::note_off(30, 1, 60),
        ];
        let timeline = ProgramTimeline::from_events(&events);
        assert_eq!(timeline.segments(), &[seg(0, 0), seg(20, 40)]);
    }

    #[test]
    fn test_segment_lookup() {
        let timeline = ProgramTimeline::normalize([seg(0, 1), seg(10, 2), seg(20, 3)]);
        assert_eq!(timeline.segment_index_at(0), 0);
        assert_eq!(timeline.segment_index_at(9), 0);
        assert_eq!(timeline.segment_index_at(10), 1);
        assert_eq!(timeline.segment_index_at(19), 1);
        assert_eq!(timeline.segment_index_at(20), 2);
        assert_eq!(timeline.segment_index_at(u64::MAX), 2);
        assert_eq!(timeline.segment_at(15).program, 2);
        assert_eq!(timeline.segment_end(1), Some(20));
        assert_eq!(timeline.segment_end(2), None);
    }
}
