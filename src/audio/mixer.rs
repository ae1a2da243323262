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
// Offline mixing of in-memory buffers.
use std::time::Duration;

use super::{AudioBuffer, AudioError};

/// Overlays the given buffers by summing them sample by sample. The result is as long as
/// the longest input; shorter inputs are treated as silence past their end.
pub fn overlay(buffers: &[AudioBuffer]) -> Result<AudioBuffer, AudioError> {
    let first = buffers
        .first()
        .ok_or_else(|| AudioError::FormatMismatch("no buffers to overlay".to_string()))?;
    let channel_count = first.channel_count();
    let sample_rate = first.sample_rate();

    for buffer in buffers.iter().skip(1) {
        if buffer.channel_count() != channel_count || buffer.sample_rate() != sample_rate {
            return Err(AudioError::FormatMismatch(format!(
                "expected {} channels at {}Hz, got {} channels at {}Hz",
                channel_count,
                sample_rate,
                buffer.channel_count(),
                buffer.sample_rate()
            )));
        }
    }

    let len = buffers
        .iter()
        .map(|buffer| buffer.samples().len())
        .max()
        .unwrap_or(0);
    let mut mixed = vec![0.0f32; len];
    for buffer in buffers {
        for (out, sample) in mixed.iter_mut().zip(buffer.samples()) {
            *out += sample;
        }
    }

    // Keep the sum in range; it's played back as-is.
    for sample in mixed.iter_mut() {
        *sample = sample.clamp(-1.0, 1.0);
    }

    Ok(AudioBuffer::new(mixed, channel_count, sample_rate))
}

/// Returns the leading segment of the buffer up to the given duration.
pub fn truncate(buffer: &AudioBuffer, duration: Duration) -> AudioBuffer {
    let frames = buffer.frames_for(duration).min(buffer.frames());
    let samples = frames * buffer.channel_count() as usize;
    AudioBuffer::new(
        buffer.samples()[..samples].to_vec(),
        buffer.channel_count(),
        buffer.sample_rate(),
    )
}
