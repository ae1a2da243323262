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
use std::{fmt, sync::Arc, time::Duration};

/// Decoded audio held in memory.
/// The sample data is stored in an Arc so renders can be replayed without copying.
#[derive(Clone)]
pub struct AudioBuffer {
    /// The sample data as f32 samples (interleaved if multi-channel).
    data: Arc<Vec<f32>>,
    /// Number of channels in the buffer.
    channel_count: u16,
    /// Sample rate of the audio data.
    sample_rate: u32,
}

impl AudioBuffer {
    /// Creates a new buffer from interleaved samples.
    pub fn new(samples: Vec<f32>, channel_count: u16, sample_rate: u32) -> AudioBuffer {
        AudioBuffer {
            data: Arc::new(samples),
            channel_count,
            sample_rate,
        }
    }

    /// Returns the interleaved samples.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Returns the number of channels.
    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Returns the sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channel_count == 0 {
            return 0;
        }
        self.data.len() / self.channel_count as usize
    }

    /// Returns the playing time of the buffer.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Returns the number of frames that make up the given duration at this buffer's rate.
    pub fn frames_for(&self, duration: Duration) -> usize {
        (duration.as_secs_f64() * self.sample_rate as f64).round() as usize
    }

    /// Returns the memory size in bytes.
    pub fn memory_size(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }

    /// Returns true if both buffers share the same sample data.
    #[cfg(test)]
    pub fn shares_data(&self, other: &AudioBuffer) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Returns how many buffers share this buffer's sample data.
    #[cfg(test)]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }
}

impl fmt::Debug for AudioBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioBuffer")
            .field("channel_count", &self.channel_count)
            .field("sample_rate", &self.sample_rate)
            .field("frames", &self.frames())
            .finish()
    }
}
