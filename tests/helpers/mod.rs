//! Test helpers and fixtures for jamstage integration tests
//!
//! Standard MIDI Files are assembled byte by byte so every test exercises the
//! real parser on input it fully controls.

#![allow(dead_code)]

use std::sync::Once;

/// Ticks per quarter note used by the fixtures; 120 BPM makes one beat 0.5 s.
pub const TEST_TICKS_PER_BEAT: u16 = 480;

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Format-1 SMF with the given tracks.
pub fn smf(ticks_per_beat: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = b"MThd".to_vec();
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    bytes.extend_from_slice(&ticks_per_beat.to_be_bytes());
    for track in tracks {
        bytes.extend_from_slice(track);
    }
    bytes
}

/// MTrk chunk builder working in absolute ticks.
#[derive(Default)]
pub struct TrackBuilder {
    body: Vec<u8>,
    tick: u64,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw message at absolute `tick` (must not go backwards).
    pub fn at(mut self, tick: u64, message: &[u8]) -> Self {
        assert!(tick >= self.tick, "events must be added in time order");
        write_vlq(&mut self.body, tick - self.tick);
        self.body.extend_from_slice(message);
        self.tick = tick;
        self
    }

    pub fn program(self, tick: u64, channel: u8, program: u8) -> Self {
        self.at(tick, &[0xC0 | channel, program])
    }

    pub fn note_on(self, tick: u64, channel: u8, note: u8, velocity: u8) -> Self {
        self.at(tick, &[0x90 | channel, note, velocity])
    }

    pub fn note_off(self, tick: u64, channel: u8, note: u8) -> Self {
        self.at(tick, &[0x80 | channel, note, 0])
    }

    /// Note-on at `start` and note-off at `end`.
    pub fn note(self, start: u64, end: u64, channel: u8, note: u8) -> Self {
        self.note_on(start, channel, note, 100).note_off(end, channel, note)
    }

    pub fn tempo(self, tick: u64, micros_per_beat: u32) -> Self {
        let [_, a, b, c] = micros_per_beat.to_be_bytes();
        self.at(tick, &[0xFF, 0x51, 0x03, a, b, c])
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
        let mut bytes = b"MTrk".to_vec();
        bytes.extend_from_slice(&(self.body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

fn write_vlq(out: &mut Vec<u8>, mut value: u64) {
    let mut buf = [0u8; 10];
    let mut i = buf.len() - 1;
    buf[i] = (value & 0x7F) as u8;
    value >>= 7;
    while value > 0 {
        i -= 1;
        buf[i] = (value & 0x7F) as u8 | 0x80;
        value >>= 7;
    }
    out.extend_from_slice(&buf[i..]);
}
