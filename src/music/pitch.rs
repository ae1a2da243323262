// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::fmt;

/// The number of semitones in an octave.
pub const SEMITONES_PER_OCTAVE: u8 = 12;

/// One of the twelve chromatic pitch classes. Spelled with flats, which is also how
/// the sample files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    Db,
    D,
    Eb,
    E,
    F,
    Gb,
    G,
    Ab,
    A,
    Bb,
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Db,
        PitchClass::D,
        PitchClass::Eb,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Gb,
        PitchClass::G,
        PitchClass::Ab,
        PitchClass::A,
        PitchClass::Bb,
        PitchClass::B,
    ];

    /// Gets the pitch class for the given index, wrapping around the octave.
    pub fn from_index(index: u8) -> PitchClass {
        PitchClass::ALL[(index % SEMITONES_PER_OCTAVE) as usize]
    }

    /// Returns the index of this pitch class (C = 0, B = 11).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Returns the name of the pitch class.
    pub fn as_str(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Db => "Db",
            PitchClass::D => "D",
            PitchClass::Eb => "Eb",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Gb => "Gb",
            PitchClass::G => "G",
            PitchClass::Ab => "Ab",
            PitchClass::A => "A",
            PitchClass::Bb => "Bb",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A concrete note: a pitch class in a specific octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pitch_class: PitchClass,
    octave: u8,
}

impl Note {
    /// Creates a new note.
    pub fn new(pitch_class: PitchClass, octave: u8) -> Note {
        Note {
            pitch_class,
            octave,
        }
    }

    /// Gets the pitch class of the note.
    pub fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }

    /// Gets the octave of the note.
    pub fn octave(&self) -> u8 {
        self.octave
    }

    /// The absolute pitch of the note in semitones above C0.
    pub fn semitones(&self) -> u32 {
        self.octave() as u32 * SEMITONES_PER_OCTAVE as u32 + self.pitch_class().index() as u32
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class(), self.octave())
    }
}
