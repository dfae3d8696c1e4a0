//! The stage: every instrument slot built for one MIDI file.

use crate::builder::SceneBuilder;
use jamstage_core::assign_channel;
use jamstage_instruments::{
    Instrument, InstrumentError, InstrumentFactory, InstrumentKind, InstrumentSlot,
    ResourceProvider,
};
use jamstage_midi::{ChannelStreams, TempoMap, PERCUSSION_CHANNEL};
use tracing::{debug, error};

/// An instrument the factory could not build.
#[derive(Debug)]
pub struct SlotFailure {
    pub channel: u8,
    /// `None` for the percussion channel.
    pub program: Option<u8>,
    pub error: InstrumentError,
}

/// What happened while building a scene, beyond the slots themselves.
#[derive(Debug, Default)]
pub struct SceneReport {
    pub failures: Vec<SlotFailure>,
    /// Channels with events but no note-on.
    pub silent_channels: Vec<u8>,
    /// Note-offs dropped because no note-on claimed their note.
    pub orphaned_note_offs: usize,
}

impl SceneReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.orphaned_note_offs == 0
    }
}

/// Ordered instrument slots for one file.
///
/// Slots are grouped by channel, then by order of first appearance of their
/// program on that channel, so indices are stable for a given input.
#[derive(Debug)]
pub struct Scene {
    slots: Vec<InstrumentSlot>,
    tempo_map: TempoMap,
    report: SceneReport,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Build one slot per (channel, program) pair that plays notes.
    ///
    /// The percussion channel gets a single drum kit regardless of its
    /// program changes. Factory failures are logged and reported; the
    /// remaining channels are still processed.
    pub fn calculate_instruments(
        streams: &ChannelStreams,
        factory: &InstrumentFactory,
        resources: &mut dyn ResourceProvider,
    ) -> Self {
        let mut slots = Vec::new();
        let mut report = SceneReport::default();

        for (channel, events) in streams.iter() {
            if events.is_empty() {
                continue;
            }
            if !streams.has_note_on(channel) {
                debug!("Channel {} has no notes; skipping", channel);
                report.silent_channels.push(channel);
                continue;
            }

            if channel == PERCUSSION_CHANNEL {
                match factory.create_percussion(resources, channel, events.to_vec()) {
                    Ok(slot) => slots.push(slot),
                    Err(e) => record_failure(&mut report, channel, None, e),
                }
                continue;
            }

            let resolution = assign_channel(events);
            report.orphaned_note_offs += resolution.orphaned.len();

            for assignment in resolution.assignments {
                let program = assignment.program;
                match factory.create(resources, program, channel, assignment.events) {
                    Ok(slot) => slots.push(slot),
                    Err(e) => record_failure(&mut report, channel, Some(program), e),
                }
            }
        }

        debug!(
            "Scene built: {} slots ({} placeholders, {} failures)",
            slots.len(),
            slots.iter().filter(|s| !s.is_implemented()).count(),
            report.failures.len()
        );

        Self {
            slots,
            tempo_map: factory.tempo_map().clone(),
            report,
        }
    }

    #[inline]
    pub fn slots(&self) -> &[InstrumentSlot] {
        &self.slots
    }

    #[inline]
    pub fn into_slots(self) -> Vec<InstrumentSlot> {
        self.slots
    }

    #[inline]
    pub fn report(&self) -> &SceneReport {
        &self.report
    }

    #[inline]
    pub fn tempo_map(&self) -> &TempoMap {
        &self.tempo_map
    }

    /// Built instruments, skipping placeholders.
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.slots.iter().filter_map(InstrumentSlot::instrument)
    }

    /// Advance every slot to `time` seconds.
    pub fn tick(&mut self, time: f64, delta: f64) {
        for slot in &mut self.slots {
            slot.tick(time, delta);
        }
    }

    /// Instruments whose kind matches `pred`.
    pub fn slots_of<F>(&self, mut pred: F) -> impl Iterator<Item = &Instrument>
    where
        F: FnMut(InstrumentKind) -> bool,
    {
        self.instruments().filter(move |i| pred(i.kind()))
    }

    /// Visible instruments whose kind matches `pred`, as of the last tick.
    pub fn count_visible<F>(&self, pred: F) -> usize
    where
        F: FnMut(InstrumentKind) -> bool,
    {
        self.slots_of(pred).filter(|i| i.is_visible()).count()
    }
}

fn record_failure(report: &mut SceneReport, channel: u8, program: Option<u8>, e: InstrumentError) {
    error!(
        "Failed to create instrument for channel {} (program {:?}): {}",
        channel, program, e
    );
    report.failures.push(SlotFailure {
        channel,
        program,
        error: e,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use jamstage_instruments::{GuitarType, NoResources};
    use jamstage_midi::ChannelEvent;

    fn build(events: Vec<ChannelEvent>) -> Scene {
        let streams = ChannelStreams::from_events(events);
        let factory = InstrumentFactory::new(TempoMap::default());
        Scene::calculate_instruments(&streams, &factory, &mut NoResources)
    }

    #[test]
    fn test_slot_order() {
        let scene = build(vec![
            ChannelEvent::program_change(0, 3, 24),
            ChannelEvent::note_on(0, 3, 50, 100),
            ChannelEvent::note_off(100, 3, 50),
            ChannelEvent::note_on(0, 1, 60, 100),
            ChannelEvent::note_off(100, 1, 60),
            ChannelEvent::program_change(200, 1, 27),
            ChannelEvent::note_on(300, 1, 62, 100),
            ChannelEvent::note_off(400, 1, 62),
        ]);

        let slots: Vec<(u8, Option<u8>)> =
            scene.slots().iter().map(|s| (s.channel(), s.program())).collect();
        assert_eq!(slots, vec![(1, Some(0)), (1, Some(27)), (3, Some(24))]);
        assert!(scene.report().is_clean());
    }

    #[test]
    fn test_silent_channel_skipped() {
        let scene = build(vec![
            ChannelEvent::program_change(0, 5, 40),
            ChannelEvent::control_change(10, 5, 7, 100),
        ]);
        assert!(scene.slots().is_empty());
        assert_eq!(scene.report().silent_channels, vec![5]);
    }

    #[test]
    fn test_orphans_counted() {
        let scene = build(vec![
            ChannelEvent::note_off(0, 0, 61),
            ChannelEvent::note_on(5, 0, 60, 100),
            ChannelEvent::program_change(10, 0, 40),
            ChannelEvent::note_off(20, 0, 60),
        ]);
        assert_eq!(scene.report().orphaned_note_offs, 1);
        assert_eq!(scene.slots().len(), 2);
    }

    #[test]
    fn test_count_visible_by_family() {
        let mut scene = build(vec![
            ChannelEvent::program_change(0, 0, 25),
            ChannelEvent::note_on(0, 0, 50, 100),
            ChannelEvent::note_off(480, 0, 50),
            ChannelEvent::program_change(0, 2, 29),
            ChannelEvent::note_on(96_000, 2, 50, 100),
            ChannelEvent::note_off(96_480, 2, 50),
        ]);

        let is_guitar = |kind: InstrumentKind| matches!(kind, InstrumentKind::Guitar(_));
        assert_eq!(scene.slots_of(is_guitar).count(), 2);

        scene.tick(0.1, 0.1);
        assert_eq!(scene.count_visible(is_guitar), 1);
        assert_eq!(
            scene.count_visible(|k| k == InstrumentKind::Guitar(GuitarType::Electric)),
            0
        );
    }
}
