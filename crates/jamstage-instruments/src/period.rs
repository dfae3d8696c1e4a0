//! Note periods: note-on/note-off pairs placed on the seconds timeline.

use jamstage_midi::{ChannelEvent, ChannelEventKind, TempoMap, NOTE_COUNT};
use serde::Serialize;

/// One sounded note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NotePeriod {
    pub note: u8,
    pub velocity: u8,
    pub start_tick: u64,
    pub end_tick: u64,
    /// Seconds.
    pub start: f64,
    /// Seconds.
    pub end: f64,
}

impl NotePeriod {
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the note sounds at `time` (start inclusive, end exclusive).
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }

    /// Whether the period overlaps `[from, to]`.
    #[inline]
    pub fn intersects(&self, from: f64, to: f64) -> bool {
        self.start <= to && self.end >= from
    }
}

/// Pair note-ons with their note-offs.
///
/// A note-on for a note that is already sounding closes the earlier period at
/// the retrigger tick. Notes still open when the events run out are dropped.
/// The result is ordered by start time.
pub fn note_periods(events: &[ChannelEvent], tempo_map: &TempoMap) -> Vec<NotePeriod> {
    let mut open: [Option<(u64, u8)>; NOTE_COUNT] = [None; NOTE_COUNT];
    let mut periods = Vec::new();

    let mut close = |note: u8, start_tick: u64, velocity: u8, end_tick: u64| {
        periods.push(NotePeriod {
            note,
            velocity,
            start_tick,
            end_tick,
            start: tempo_map.tick_to_seconds(start_tick),
            end: tempo_map.tick_to_seconds(end_tick),
        });
    };

    for event in events {
        match event.kind {
            ChannelEventKind::NoteOn { note, velocity } => {
                let Some(slot) = open.get_mut(note as usize) else {
                    continue;
                };
                if let Some((start_tick, previous)) = slot.replace((event.time, velocity)) {
                    close(note, start_tick, previous, event.time);
                }
            }
            ChannelEventKind::NoteOff { note, .. } => {
                if let Some((start_tick, velocity)) =
                    open.get_mut(note as usize).and_then(Option::take)
                {
                    close(note, start_tick, velocity, event.time);
                }
            }
            _ => {}
        }
    }

    periods.sort_by_key(|p| (p.start_tick, p.note));
    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pairs_on_and_off() {
        // 480 ticks per beat at 120 BPM: one beat is half a second
        let tempo = TempoMap::default();
        let events = [
            ChannelEvent::note_on(0, 0, 60, 90),
            ChannelEvent::note_on(480, 0, 64, 80),
            ChannelEvent::note_off(960, 0, 60),
            ChannelEvent::note_off(1440, 0, 64),
        ];
        let periods = note_periods(&events, &tempo);

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].note, 60);
        assert_eq!(periods[0].velocity, 90);
        assert_relative_eq!(periods[0].start, 0.0);
        assert_relative_eq!(periods[0].end, 1.0, epsilon = 1e-9);
        assert_eq!(periods[1].note, 64);
        assert_relative_eq!(periods[1].start, 0.5, epsilon = 1e-9);
        assert_relative_eq!(periods[1].duration(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_retrigger_closes_previous() {
        let tempo = TempoMap::default();
        let events = [
            ChannelEvent::note_on(0, 0, 60, 100),
            ChannelEvent::note_on(240, 0, 60, 50),
            ChannelEvent::note_off(480, 0, 60),
        ];
        let periods = note_periods(&events, &tempo);

        assert_eq!(periods.len(), 2);
        assert_eq!((periods[0].start_tick, periods[0].end_tick), (0, 240));
        assert_eq!(periods[0].velocity, 100);
        assert_eq!((periods[1].start_tick, periods[1].end_tick), (240, 480));
        assert_eq!(periods[1].velocity, 50);
    }

    #[test]
    fn test_unclosed_and_stray_notes_dropped() {
        let tempo = TempoMap::default();
        let events = [
            ChannelEvent::note_off(0, 0, 62),
            ChannelEvent::note_on(10, 0, 60, 100),
            ChannelEvent::control_change(20, 0, 64, 127),
        ];
        assert!(note_periods(&events, &tempo).is_empty());
    }

    #[test]
    fn test_contains_is_half_open() {
        let period = NotePeriod {
            note: 60,
            velocity: 100,
            start_tick: 0,
            end_tick: 480,
            start: 0.0,
            end: 0.5,
        };
        assert!(period.contains(0.0));
        assert!(period.contains(0.25));
        assert!(!period.contains(0.5));
        assert!(period.intersects(0.5, 2.0));
        assert!(!period.intersects(0.6, 2.0));
    }
}
