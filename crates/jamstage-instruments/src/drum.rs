//! General MIDI percussion key map.

use serde::{Deserialize, Serialize};

/// Drum kit pieces the percussion channel animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrumPiece {
    BassDrum,
    Snare,
    HiHat,
    HighTom,
    MidTom,
    LowTom,
    FloorTom,
    Crash,
    Ride,
    Splash,
    China,
    Cowbell,
    Tambourine,
    Claves,
    Bongos,
    Congas,
    Timbales,
    Cabasa,
    Maracas,
    Triangle,
    Whistle,
    Guiro,
    Woodblock,
}

impl DrumPiece {
    /// The kit piece struck by a percussion-channel note, if the stage has one.
    pub fn from_note(note: u8) -> Option<Self> {
        use DrumPiece::*;

        let piece = match note {
            35 | 36 => BassDrum,
            // Side stick, snares, hand clap
            37 | 38 | 39 | 40 => Snare,
            42 | 44 | 46 => HiHat,
            41 | 43 => FloorTom,
            45 => LowTom,
            47 | 48 => MidTom,
            50 => HighTom,
            49 | 57 => Crash,
            51 | 53 | 59 => Ride,
            52 => China,
            55 => Splash,
            54 => Tambourine,
            56 => Cowbell,
            58 | 69 => Cabasa,
            60 | 61 => Bongos,
            62 | 63 | 64 => Congas,
            65 | 66 => Timbales,
            67 | 68 | 76 | 77 => Woodblock,
            70 => Maracas,
            71 | 72 => Whistle,
            73 | 74 => Guiro,
            75 => Claves,
            80 | 81 => Triangle,
            _ => return None,
        };

        Some(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kit_core() {
        assert_eq!(DrumPiece::from_note(36), Some(DrumPiece::BassDrum));
        assert_eq!(DrumPiece::from_note(38), Some(DrumPiece::Snare));
        assert_eq!(DrumPiece::from_note(42), Some(DrumPiece::HiHat));
        assert_eq!(DrumPiece::from_note(49), Some(DrumPiece::Crash));
        assert_eq!(DrumPiece::from_note(51), Some(DrumPiece::Ride));
    }

    #[test]
    fn test_outside_kit() {
        assert_eq!(DrumPiece::from_note(0), None);
        assert_eq!(DrumPiece::from_note(34), None);
        assert_eq!(DrumPiece::from_note(82), None);
        assert_eq!(DrumPiece::from_note(127), None);
    }
}
