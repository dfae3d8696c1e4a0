//! Constructed instruments and their per-frame state.

use crate::drum::DrumPiece;
use crate::kind::InstrumentKind;
use crate::period::{note_periods, NotePeriod};
use jamstage_midi::{ChannelEvent, TempoMap};
use serde::{Deserialize, Serialize};

/// How long around its notes an instrument stays on stage, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityWindow {
    /// Shown this long before its next note.
    pub lead: f64,
    /// Kept this long after its last note ends.
    pub tail: f64,
}

impl Default for VisibilityWindow {
    fn default() -> Self {
        Self {
            lead: 1.0,
            tail: 5.0,
        }
    }
}

/// An instrument built for one program on one channel.
#[derive(Debug, Clone)]
pub struct Instrument {
    kind: InstrumentKind,
    program: Option<u8>,
    channel: u8,
    events: Vec<ChannelEvent>,
    periods: Vec<NotePeriod>,
    window: VisibilityWindow,

    // Frame state, refreshed by `tick`.
    sounding: Vec<u8>,
    struck: Vec<u8>,
    visible: bool,
}

impl Instrument {
    pub fn new(
        kind: InstrumentKind,
        program: Option<u8>,
        channel: u8,
        events: Vec<ChannelEvent>,
        tempo_map: &TempoMap,
        window: VisibilityWindow,
    ) -> Self {
        let periods = note_periods(&events, tempo_map);
        Self {
            kind,
            program,
            channel,
            events,
            periods,
            window,
            sounding: Vec::new(),
            struck: Vec::new(),
            visible: false,
        }
    }

    #[inline]
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// `None` for the drum kit.
    #[inline]
    pub fn program(&self) -> Option<u8> {
        self.program
    }

    #[inline]
    pub fn channel(&self) -> u8 {
        self.channel
    }

    #[inline]
    pub fn events(&self) -> &[ChannelEvent] {
        &self.events
    }

    #[inline]
    pub fn periods(&self) -> &[NotePeriod] {
        &self.periods
    }

    #[inline]
    pub fn window(&self) -> VisibilityWindow {
        self.window
    }

    /// Advance to `time` seconds, `delta` seconds after the previous frame.
    pub fn tick(&mut self, time: f64, delta: f64) {
        self.sounding.clear();
        self.struck.clear();

        let previous = time - delta.max(0.0);
        let (from, to) = (time - self.window.tail, time + self.window.lead);
        let mut visible = false;

        for period in &self.periods {
            if period.contains(time) {
                self.sounding.push(period.note);
            }
            if period.start > previous && period.start <= time {
                self.struck.push(period.note);
            }
            visible |= period.intersects(from, to);
        }

        self.sounding.sort_unstable();
        self.sounding.dedup();
        self.struck.sort_unstable();
        self.struck.dedup();
        self.visible = visible;
    }

    /// Notes held at the last tick, ascending.
    #[inline]
    pub fn sounding_notes(&self) -> &[u8] {
        &self.sounding
    }

    /// Notes that started since the previous tick, ascending.
    #[inline]
    pub fn struck_notes(&self) -> &[u8] {
        &self.struck
    }

    /// Kit pieces hit since the previous tick. Empty for melodic instruments.
    pub fn struck_pieces(&self) -> Vec<DrumPiece> {
        if !self.kind.is_percussion() {
            return Vec::new();
        }
        let mut pieces: Vec<DrumPiece> = Vec::new();
        for piece in self.struck.iter().filter_map(|&note| DrumPiece::from_note(note)) {
            if !pieces.contains(&piece) {
                pieces.push(piece);
            }
        }
        pieces
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Factory output: a built instrument, or a placeholder keeping the events
/// of a program the stage has no instrument for.
#[derive(Debug, Clone)]
pub enum InstrumentSlot {
    Instrument(Instrument),
    Unimplemented {
        program: u8,
        channel: u8,
        events: Vec<ChannelEvent>,
    },
}

impl InstrumentSlot {
    pub fn events(&self) -> &[ChannelEvent] {
        match self {
            Self::Instrument(instrument) => instrument.events(),
            Self::Unimplemented { events, .. } => events,
        }
    }

    pub fn channel(&self) -> u8 {
        match self {
            Self::Instrument(instrument) => instrument.channel(),
            Self::Unimplemented { channel, .. } => *channel,
        }
    }

    pub fn program(&self) -> Option<u8> {
        match self {
            Self::Instrument(instrument) => instrument.program(),
            Self::Unimplemented { program, .. } => Some(*program),
        }
    }

    pub fn kind(&self) -> Option<InstrumentKind> {
        self.instrument().map(Instrument::kind)
    }

    #[inline]
    pub fn is_implemented(&self) -> bool {
        matches!(self, Self::Instrument(_))
    }

    pub fn instrument(&self) -> Option<&Instrument> {
        match self {
            Self::Instrument(instrument) => Some(instrument),
            Self::Unimplemented { .. } => None,
        }
    }

    /// Placeholders have no frame state.
    pub fn tick(&mut self, time: f64, delta: f64) {
        if let Self::Instrument(instrument) = self {
            instrument.tick(time, delta);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.instrument().is_some_and(Instrument::is_visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::KeyboardSkin;

    fn piano(events: Vec<ChannelEvent>) -> Instrument {
        Instrument::new(
            InstrumentKind::Keyboard(KeyboardSkin::Piano),
            Some(0),
            0,
            events,
            &TempoMap::default(),
            VisibilityWindow::default(),
        )
    }

    #[test]
    fn test_tick_sounding_and_struck() {
        // 960 ticks = 1 s at the default tempo
        let mut piano = piano(vec![
            ChannelEvent::note_on(960, 0, 60, 100),
            ChannelEvent::note_on(960, 0, 64, 100),
            ChannelEvent::note_off(1920, 0, 60),
            ChannelEvent::note_off(2880, 0, 64),
        ]);

        piano.tick(1.01, 0.1);
        assert_eq!(piano.sounding_notes(), &[60, 64]);
        assert_eq!(piano.struck_notes(), &[60, 64]);

        piano.tick(1.5, 0.49);
        assert_eq!(piano.sounding_notes(), &[60, 64]);
        assert!(piano.struck_notes().is_empty());

        piano.tick(2.01, 0.51);
        assert_eq!(piano.sounding_notes(), &[64]);
    }

    #[test]
    fn test_visibility_window() {
        // note sounds from 10 s to 11 s
        let mut piano = piano(vec![
            ChannelEvent::note_on(9600, 0, 60, 100),
            ChannelEvent::note_off(10560, 0, 60),
        ]);

        piano.tick(0.0, 0.0);
        assert!(!piano.is_visible());
        piano.tick(9.5, 0.1);
        assert!(piano.is_visible());
        piano.tick(15.9, 0.1);
        assert!(piano.is_visible());
        piano.tick(16.5, 0.1);
        assert!(!piano.is_visible());
    }

    #[test]
    fn test_struck_pieces_on_kit() {
        let mut kit = Instrument::new(
            InstrumentKind::Percussion,
            None,
            9,
            vec![
                ChannelEvent::note_on(0, 9, 36, 100),
                ChannelEvent::note_on(0, 9, 42, 100),
                ChannelEvent::note_on(0, 9, 20, 100),
                ChannelEvent::note_off(240, 9, 36),
                ChannelEvent::note_off(240, 9, 42),
                ChannelEvent::note_off(240, 9, 20),
            ],
            &TempoMap::default(),
            VisibilityWindow::default(),
        );

        kit.tick(0.0, 0.1);
        assert_eq!(kit.struck_pieces(), vec![DrumPiece::BassDrum, DrumPiece::HiHat]);
    }

    #[test]
    fn test_placeholder_slot() {
        let events = vec![ChannelEvent::note_on(0, 3, 60, 100)];
        let mut slot = InstrumentSlot::Unimplemented {
            program: 104,
            channel: 3,
            events: events.clone(),
        };

        slot.tick(0.0, 0.1);
        assert!(!slot.is_visible());
        assert!(!slot.is_implemented());
        assert_eq!(slot.kind(), None);
        assert_eq!(slot.channel(), 3);
        assert_eq!(slot.events(), events.as_slice());
    }
}
