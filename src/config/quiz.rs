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
use serde::Deserialize;

use crate::music::chord::DEFAULT_LOWEST_OCTAVE;

/// Chord generation options.
#[derive(Deserialize, Clone, Default)]
pub struct Quiz {
    /// The octave the bottom note of every chord starts in.
    lowest_octave: Option<u8>,

    /// Only ask about root position chords.
    root_only: Option<bool>,
}

impl Quiz {
    pub fn lowest_octave(&self) -> u8 {
        self.lowest_octave.unwrap_or(DEFAULT_LOWEST_OCTAVE)
    }

    pub fn root_only(&self) -> bool {
        self.root_only.unwrap_or(false)
    }
}
