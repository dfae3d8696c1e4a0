//! Instrument kinds and their visual variants.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardSkin {
    Piano,
    Bright,
    ElectricGrand,
    HonkyTonk,
    Electric1,
    Electric2,
    Harpsichord,
    Clavichord,
    Celesta,
    Wood,
    Synth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MalletType {
    Glockenspiel,
    Vibes,
    Marimba,
    Xylophone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuitarType {
    Acoustic,
    Electric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BassGuitarType {
    Standard,
    Fretless,
}

/// How an upright bass is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayingStyle {
    Pizzicato,
    Arco,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrumpetType {
    Normal,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeSkin {
    Wood,
    Gold,
}

/// Every instrument the stage can show.
///
/// Several General MIDI programs share a kind; the parameter selects the
/// model variant (body type, skin, material).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    // Keyboards and chromatic percussion
    Keyboard(KeyboardSkin),
    Mallets(MalletType),
    TubularBells,
    MusicBox,
    Accordion,
    Harmonica,

    // Strings
    Guitar(GuitarType),
    BassGuitar(BassGuitarType),
    AcousticBass(PlayingStyle),
    Violin,
    Viola,
    Cello,
    Harp,
    StageStrings,
    PizzicatoStrings,
    Banjo,
    Shamisen,
    Fiddle,

    // Ensembles
    StageChoir,
    StageHorns,

    // Brass
    Trumpet(TrumpetType),
    Trombone,
    Tuba,
    FrenchHorn,

    // Reeds and pipes
    SopranoSax,
    AltoSax,
    TenorSax,
    BaritoneSax,
    Clarinet,
    Piccolo,
    Flute,
    Recorder,
    PanFlute(PipeSkin),
    BlownBottle,
    Whistles,
    Ocarina,

    // Percussive
    Timpani,
    Agogos,
    SteelDrums,
    Woodblocks,
    TaikoDrum,
    MelodicTom,
    SynthDrum,

    // Sound effects
    TelephoneRing,
    Helicopter,

    /// The drum kit on the percussion channel.
    Percussion,
}

impl InstrumentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyboard(_) => "keyboard",
            Self::Mallets(_) => "mallets",
            Self::TubularBells => "tubular bells",
            Self::MusicBox => "music box",
            Self::Accordion => "accordion",
            Self::Harmonica => "harmonica",
            Self::Guitar(_) => "guitar",
            Self::BassGuitar(_) => "bass guitar",
            Self::AcousticBass(_) => "acoustic bass",
            Self::Violin => "violin",
            Self::Viola => "viola",
            Self::Cello => "cello",
            Self::Harp => "harp",
            Self::StageStrings => "stage strings",
            Self::PizzicatoStrings => "pizzicato strings",
            Self::Banjo => "banjo",
            Self::Shamisen => "shamisen",
            Self::Fiddle => "fiddle",
            Self::StageChoir => "stage choir",
            Self::StageHorns => "stage horns",
            Self::Trumpet(_) => "trumpet",
            Self::Trombone => "trombone",
            Self::Tuba => "tuba",
            Self::FrenchHorn => "french horn",
            Self::SopranoSax => "soprano sax",
            Self::AltoSax => "alto sax",
            Self::TenorSax => "tenor sax",
            Self::BaritoneSax => "baritone sax",
            Self::Clarinet => "clarinet",
            Self::Piccolo => "piccolo",
            Self::Flute => "flute",
            Self::Recorder => "recorder",
            Self::PanFlute(_) => "pan flute",
            Self::BlownBottle => "blown bottle",
            Self::Whistles => "whistles",
            Self::Ocarina => "ocarina",
            Self::Timpani => "timpani",
            Self::Agogos => "agogos",
            Self::SteelDrums => "steel drums",
            Self::Woodblocks => "woodblocks",
            Self::TaikoDrum => "taiko drum",
            Self::MelodicTom => "melodic tom",
            Self::SynthDrum => "synth drum",
            Self::TelephoneRing => "telephone ring",
            Self::Helicopter => "helicopter",
            Self::Percussion => "percussion",
        }
    }

    #[inline]
    pub fn is_percussion(&self) -> bool {
        matches!(self, Self::Percussion)
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyboard(skin) => write!(f, "keyboard ({skin:?})"),
            Self::Mallets(mallet) => write!(f, "mallets ({mallet:?})"),
            Self::Guitar(guitar) => write!(f, "guitar ({guitar:?})"),
            Self::BassGuitar(bass) => write!(f, "bass guitar ({bass:?})"),
            Self::AcousticBass(style) => write!(f, "acoustic bass ({style:?})"),
            Self::Trumpet(trumpet) => write!(f, "trumpet ({trumpet:?})"),
            Self::PanFlute(skin) => write!(f, "pan flute ({skin:?})"),
            other => f.write_str(other.name()),
        }
    }
}
