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
use std::{any::Any, fmt, path::PathBuf, sync::Arc, time::Duration};

use crate::music::Note;

pub mod buffer;
pub mod cpal;
pub mod engine;
pub mod mixer;
pub mod mock;
pub mod sample_source;

pub use buffer::AudioBuffer;
pub use engine::{AudioEngine, Engine};

use sample_source::error::SampleSourceError;

/// Errors raised while loading, mixing or playing audio.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no sample for {note} found at {}", path.display())]
    SampleNotFound { note: Note, path: PathBuf },

    #[error("unable to decode sample {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: SampleSourceError,
    },

    #[error("incompatible audio buffers: {0}")]
    FormatMismatch(String),

    #[error("no output device found with name {0}")]
    DeviceNotFound(String),

    #[error("audio device error: {0}")]
    Device(String),

    #[error("playback failed: {0}")]
    Playback(String),
}

pub trait Device: Any + fmt::Display + std::marker::Send + std::marker::Sync {
    /// The sample rate buffers must have to be played on this device.
    fn sample_rate(&self) -> u32;

    /// Plays the given buffer through the device. Blocks until playback has finished.
    fn play(&self, buffer: &AudioBuffer) -> Result<(), AudioError>;
}

/// Gets a device with the given name. Names starting with "mock" produce a silent device,
/// "default" selects the host's default output.
pub fn get_device(name: &str, playback_delay: Duration) -> Result<Arc<dyn Device>, AudioError> {
    if name.starts_with("mock") {
        return Ok(Arc::new(mock::Device::get(name)));
    };

    Ok(Arc::new(cpal::Device::get(name, playback_delay)?))
}
