//! Tick-to-seconds conversion driven by the file's tempo meta events.

/// Tempo assumed before the first tempo event (120 BPM).
pub const DEFAULT_MICROS_PER_BEAT: u32 = 500_000;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TempoPoint {
    tick: u64,
    micros_per_beat: u32,
    /// Elapsed seconds at `tick`, accumulated over the preceding points.
    seconds: f64,
}

impl TempoPoint {
    #[inline]
    fn seconds_per_tick(&self, ticks_per_beat: u16) -> f64 {
        self.micros_per_beat as f64 / 1_000_000.0 / ticks_per_beat as f64
    }
}

/// Piecewise-constant tempo map over absolute ticks.
///
/// Always holds a point at tick 0, so every tick resolves to a tempo.
#[derive(Debug, Clone, PartialEq)]
pub struct TempoMap {
    ticks_per_beat: u16,
    points: Vec<TempoPoint>,
}

impl TempoMap {
    /// Build a map from `(tick, microseconds per quarter note)` changes.
    ///
    /// Changes may arrive unsorted (one list per track); several changes at the
    /// same tick keep the last one in input order.
    pub fn new(ticks_per_beat: u16, changes: impl IntoIterator<Item = (u64, u32)>) -> Self {
        let ticks_per_beat = ticks_per_beat.max(1);

        let mut changes: Vec<(u64, u32)> = changes
            .into_iter()
            .filter(|&(_, micros)| micros > 0)
            .collect();
        changes.sort_by_key(|&(tick, _)| tick);

        let mut points: Vec<TempoPoint> = Vec::with_capacity(changes.len() + 1);
        if changes.first().map_or(true, |&(tick, _)| tick != 0) {
            points.push(TempoPoint {
                tick: 0,
                micros_per_beat: DEFAULT_MICROS_PER_BEAT,
                seconds: 0.0,
            });
        }

        for (tick, micros_per_beat) in changes {
            match points.last_mut() {
                Some(last) if last.tick == tick => last.micros_per_beat = micros_per_beat,
                Some(last) => {
                    let seconds =
                        last.seconds + (tick - last.tick) as f64 * last.seconds_per_tick(ticks_per_beat);
                    points.push(TempoPoint {
                        tick,
                        micros_per_beat,
                        seconds,
                    });
                }
                None => points.push(TempoPoint {
                    tick,
                    micros_per_beat,
                    seconds: 0.0,
                }),
            }
        }

        Self {
            ticks_per_beat,
            points,
        }
    }

    /// A map with a single tempo for the whole file.
    pub fn constant(ticks_per_beat: u16, micros_per_beat: u32) -> Self {
        Self::new(ticks_per_beat, [(0, micros_per_beat)])
    }

    #[inline]
    pub fn ticks_per_beat(&self) -> u16 {
        self.ticks_per_beat
    }

    /// Number of distinct tempo regions.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    fn point_at(&self, tick: u64) -> &TempoPoint {
        // points[0].tick == 0, so the partition point is at least 1
        let idx = self.points.partition_point(|p| p.tick <= tick);
        &self.points[idx.saturating_sub(1)]
    }

    pub fn tick_to_seconds(&self, tick: u64) -> f64 {
        let point = self.point_at(tick);
        point.seconds + (tick - point.tick) as f64 * point.seconds_per_tick(self.ticks_per_beat)
    }

    pub fn bpm_at(&self, tick: u64) -> f64 {
        60_000_000.0 / self.point_at(tick).micros_per_beat as f64
    }
}

impl Default for TempoMap {
    fn default() -> Self {
        Self::constant(480, DEFAULT_MICROS_PER_BEAT)
    }
}
