//! Instrument Factory
//!
//! Maps General MIDI programs to instrument kinds and builds instrument
//! slots from assigned events.

use crate::error::{InstrumentError, Result};
use crate::instrument::{Instrument, InstrumentSlot, VisibilityWindow};
use crate::kind::{
    BassGuitarType, GuitarType, InstrumentKind, KeyboardSkin, MalletType, PipeSkin, PlayingStyle,
    TrumpetType,
};
use jamstage_midi::{ChannelEvent, TempoMap, CHANNEL_COUNT};
use tracing::debug;

/// The instrument shown for a General MIDI program, or `None` when the
/// program has no visual (many pads and effects).
pub fn kind_for_program(program: u8) -> Option<InstrumentKind> {
    use InstrumentKind::*;

    let kind = match program {
        0 => Keyboard(KeyboardSkin::Piano),
        1 => Keyboard(KeyboardSkin::Bright),
        2 => Keyboard(KeyboardSkin::ElectricGrand),
        3 => Keyboard(KeyboardSkin::HonkyTonk),
        4 => Keyboard(KeyboardSkin::Electric1),
        5 => Keyboard(KeyboardSkin::Electric2),
        6 => Keyboard(KeyboardSkin::Harpsichord),
        7 => Keyboard(KeyboardSkin::Clavichord),
        8 => Keyboard(KeyboardSkin::Celesta),
        9 => Mallets(MalletType::Glockenspiel),
        10 => MusicBox,
        11 => Mallets(MalletType::Vibes),
        12 => Mallets(MalletType::Marimba),
        13 => Mallets(MalletType::Xylophone),
        // Tubular Bells, FX 3 (Crystal), Tinkle Bell
        14 | 98 | 112 => TubularBells,
        // Dulcimer, organs, Orchestra Hit
        15..=20 | 55 => Keyboard(KeyboardSkin::Wood),
        21 | 23 => Accordion,
        22 => Harmonica,
        24 | 25 => Guitar(GuitarType::Acoustic),
        // Electric, overdriven and distortion guitars, harmonics, fret noise
        26..=31 | 120 => Guitar(GuitarType::Electric),
        32 => AcousticBass(PlayingStyle::Pizzicato),
        33 | 34 | 36..=39 => BassGuitar(BassGuitarType::Standard),
        35 => BassGuitar(BassGuitarType::Fretless),
        40 => Violin,
        41 => Viola,
        42 => Cello,
        43 => AcousticBass(PlayingStyle::Arco),
        // Tremolo Strings, ensembles, synth strings, Pad 5 (Bowed)
        44 | 48..=51 | 92 => StageStrings,
        45 => PizzicatoStrings,
        46 => Harp,
        47 => Timpani,
        // Voices, Lead 6 (Voice), Pad 4 (Choir), Breath Noise, Applause
        52..=54 | 85 | 91 | 121 | 126 => StageChoir,
        56 => Trumpet(TrumpetType::Normal),
        57 => Trombone,
        58 => Tuba,
        59 => Trumpet(TrumpetType::Muted),
        60 => FrenchHorn,
        61..=63 => StageHorns,
        64 => SopranoSax,
        65 => AltoSax,
        66 => TenorSax,
        67 => BaritoneSax,
        71 => Clarinet,
        72 => Piccolo,
        73 => Flute,
        74 => Recorder,
        75 => PanFlute(PipeSkin::Wood),
        76 => BlownBottle,
        78 => Whistles,
        79 => Ocarina,
        // Synth leads, pads and most FX
        80 | 81 | 83 | 84 | 86..=90 | 93..=97 | 99..=103 => Keyboard(KeyboardSkin::Synth),
        // Lead 3 (Calliope)
        82 => PanFlute(PipeSkin::Gold),
        105 => Banjo,
        106 => Shamisen,
        110 => Fiddle,
        113 => Agogos,
        114 => SteelDrums,
        115 => Woodblocks,
        116 => TaikoDrum,
        117 => MelodicTom,
        118 => SynthDrum,
        124 => TelephoneRing,
        125 => Helicopter,
        _ => return None,
    };

    Some(kind)
}

/// Hook for whatever the renderer must prepare before an instrument can be
/// shown (models, textures). Called once per constructed instrument.
pub trait ResourceProvider {
    fn acquire(&mut self, kind: InstrumentKind) -> Result<()>;
}

/// Provider for headless use: every resource is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceProvider for NoResources {
    fn acquire(&mut self, _kind: InstrumentKind) -> Result<()> {
        Ok(())
    }
}

impl<F> ResourceProvider for F
where
    F: FnMut(InstrumentKind) -> Result<()>,
{
    fn acquire(&mut self, kind: InstrumentKind) -> Result<()> {
        self(kind)
    }
}

/// Builds instrument slots for one file.
///
/// # Example
///
/// ```ignore
/// let factory = InstrumentFactory::new(file.tempo_map().clone());
/// let slot = factory.create(&mut NoResources, 40, 0, events)?;
/// assert_eq!(slot.kind(), Some(InstrumentKind::Violin));
/// ```
#[derive(Debug, Clone)]
pub struct InstrumentFactory {
    tempo_map: TempoMap,
    window: VisibilityWindow,
}

impl InstrumentFactory {
    pub fn new(tempo_map: TempoMap) -> Self {
        Self {
            tempo_map,
            window: VisibilityWindow::default(),
        }
    }

    pub fn window(mut self, window: VisibilityWindow) -> Self {
        self.window = window;
        self
    }

    #[inline]
    pub fn tempo_map(&self) -> &TempoMap {
        &self.tempo_map
    }

    /// Build the slot for a melodic program's assignment. Unmapped programs
    /// produce an [`InstrumentSlot::Unimplemented`] placeholder without
    /// touching `resources`.
    pub fn create(
        &self,
        resources: &mut dyn ResourceProvider,
        program: u8,
        channel: u8,
        events: Vec<ChannelEvent>,
    ) -> Result<InstrumentSlot> {
        check_channel(channel)?;

        let Some(kind) = kind_for_program(program) else {
            debug!(
                "No instrument for program {} on channel {}; using placeholder",
                program, channel
            );
            return Ok(InstrumentSlot::Unimplemented {
                program,
                channel,
                events,
            });
        };

        self.build(resources, kind, Some(program), channel, events)
    }

    /// Build the drum kit for the percussion channel, ignoring programs.
    pub fn create_percussion(
        &self,
        resources: &mut dyn ResourceProvider,
        channel: u8,
        events: Vec<ChannelEvent>,
    ) -> Result<InstrumentSlot> {
        check_channel(channel)?;
        self.build(resources, InstrumentKind::Percussion, None, channel, events)
    }

    fn build(
        &self,
        resources: &mut dyn ResourceProvider,
        kind: InstrumentKind,
        program: Option<u8>,
        channel: u8,
        events: Vec<ChannelEvent>,
    ) -> Result<InstrumentSlot> {
        resources.acquire(kind)?;

        let instrument = Instrument::new(kind, program, channel, events, &self.tempo_map, self.window);
        debug!(
            "Created {} on channel {} with {} events, {} notes",
            kind,
            channel,
            instrument.events().len(),
            instrument.periods().len()
        );

        Ok(InstrumentSlot::Instrument(instrument))
    }
}

fn check_channel(channel: u8) -> Result<()> {
    if channel as usize >= CHANNEL_COUNT {
        return Err(InstrumentError::InvalidChannel(channel));
    }
    Ok(())
}
