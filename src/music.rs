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

//! Music theory for the quiz.
//!
//! This module provides:
//! - Pitch classes and concrete notes (pitch class plus octave)
//! - Triad qualities, inversions and quiz positions
//! - The chord generator that turns a random choice into an ascending voicing

pub mod chord;
pub mod pitch;

pub use chord::{Chord, ChordGenerator, ChordQuality, Inversion, NotePosition};
pub use pitch::{Note, PitchClass};
