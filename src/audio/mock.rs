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
use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use tracing::{info, span, Level};

use super::{AudioBuffer, AudioError};

const MOCK_SAMPLE_RATE: u32 = 44100;

/// A mock device. Doesn't actually play anything. Only the most recent buffer is kept.
#[derive(Clone)]
pub struct Device {
    name: String,
    play_count: Arc<AtomicUsize>,
    last_played: Arc<Mutex<Option<AudioBuffer>>>,
    fail: bool,
}

impl Device {
    /// Gets the given mock device.
    pub fn get(name: &str) -> Device {
        Device {
            name: name.to_string(),
            play_count: Arc::new(AtomicUsize::new(0)),
            last_played: Arc::new(Mutex::new(None)),
            fail: false,
        }
    }

    /// A mock device that rejects every buffer.
    #[cfg(test)]
    pub fn failing(name: &str) -> Device {
        Device {
            fail: true,
            ..Device::get(name)
        }
    }

    /// Returns how many buffers have been played.
    #[cfg(test)]
    pub fn play_count(&self) -> usize {
        self.play_count.load(Ordering::Relaxed)
    }

    /// Returns the most recently played buffer.
    #[cfg(test)]
    pub fn last_played(&self) -> Option<AudioBuffer> {
        self.last_played
            .lock()
            .ok()
            .and_then(|last_played| last_played.clone())
    }
}

impl super::Device for Device {
    fn sample_rate(&self) -> u32 {
        MOCK_SAMPLE_RATE
    }

    /// Remembers the buffer instead of playing it.
    fn play(&self, buffer: &AudioBuffer) -> Result<(), AudioError> {
        let span = span!(Level::INFO, "play buffer (mock)");
        let _enter = span.enter();

        if self.fail {
            return Err(AudioError::Playback(format!("{} refused to play", self)));
        }

        info!(
            device = self.name,
            duration_ms = buffer.duration().as_millis(),
            channels = buffer.channel_count(),
            "Playing buffer."
        );

        *self
            .last_played
            .lock()
            .map_err(|e| AudioError::Playback(e.to_string()))? = Some(buffer.clone());
        self.play_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Mock)", self.name,)
    }
}
