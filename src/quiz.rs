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
//! The ear training quiz: chord rounds and their state.

use std::io;

use crate::audio::AudioError;

mod session;

pub use session::QuizSession;

/// Errors a quiz command can end with.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// Repeat or answer was asked for before any chord was played.
    #[error("no chords played yet! Press p to play a chord.")]
    NoChordYet,

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("unable to write to the terminal: {0}")]
    Io(#[from] io::Error),
}
