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
use std::{sync::Arc, time::Duration};

use super::{mixer, AudioBuffer, AudioError, Device};
use crate::music::Note;
use crate::samples::NoteLoader;

/// Everything the quiz needs from the audio layer.
pub trait AudioEngine {
    /// Loads the recording of a single note.
    fn load_note(&self, note: Note) -> Result<AudioBuffer, AudioError>;

    /// Mixes the buffers into one, played simultaneously.
    fn overlay(&self, buffers: &[AudioBuffer]) -> Result<AudioBuffer, AudioError>;

    /// Plays the buffer, blocking until it has finished.
    fn play(&self, buffer: &AudioBuffer) -> Result<(), AudioError>;

    /// Returns the leading segment of the buffer.
    fn truncate(&self, buffer: &AudioBuffer, duration: Duration) -> AudioBuffer;
}

/// The audio engine backed by the note library and an output device.
pub struct Engine {
    loader: NoteLoader,
    device: Arc<dyn Device>,
}

impl Engine {
    pub fn new(loader: NoteLoader, device: Arc<dyn Device>) -> Engine {
        Engine { loader, device }
    }
}

impl AudioEngine for Engine {
    fn load_note(&self, note: Note) -> Result<AudioBuffer, AudioError> {
        self.loader.load(note)
    }

    fn overlay(&self, buffers: &[AudioBuffer]) -> Result<AudioBuffer, AudioError> {
        mixer::overlay(buffers)
    }

    fn play(&self, buffer: &AudioBuffer) -> Result<(), AudioError> {
        self.device.play(buffer)
    }

    fn truncate(&self, buffer: &AudioBuffer, duration: Duration) -> AudioBuffer {
        mixer::truncate(buffer, duration)
    }
}
