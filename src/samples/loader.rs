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
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::audio::sample_source::AudioSampleSource;
use crate::audio::{AudioBuffer, AudioError};
use crate::config::{self, ConfigError};
use crate::music::Note;

/// Loads note recordings from the sample library. Every load decodes the file again, so
/// the returned buffer is owned by the caller alone.
pub struct NoteLoader {
    /// Directory containing the recordings.
    path: PathBuf,
    /// Extension of the recordings, without the dot.
    extension: String,
    /// Leading silence skipped in every recording.
    start_offset: Duration,
    /// Length kept after the offset.
    note_length: Duration,
    /// Target sample rate for transcoding (matches audio output).
    target_sample_rate: u32,
}

impl NoteLoader {
    /// Creates a new note loader from the sample configuration.
    pub fn new(samples: &config::Samples, target_sample_rate: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            path: samples.path(),
            extension: samples.extension().to_string(),
            start_offset: samples.start_offset()?,
            note_length: samples.note_length()?,
            target_sample_rate,
        })
    }

    /// The directory recordings are loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file a note is expected to be recorded in.
    pub fn sample_path(&self, note: Note) -> PathBuf {
        self.path.join(format!("{}.{}", note, self.extension))
    }

    /// Loads a note into memory, skipping the start offset and keeping at most the note
    /// length.
    pub fn load(&self, note: Note) -> Result<AudioBuffer, AudioError> {
        let path = self.sample_path(note);
        if !path.is_file() {
            return Err(AudioError::SampleNotFound { note, path });
        }

        info!(path = ?path, "Loading note into memory");

        let decode_error = |source| AudioError::Decode {
            path: path.clone(),
            source,
        };
        let mut source = AudioSampleSource::from_file(&path).map_err(decode_error)?;
        let source_sample_rate = source.sample_rate();
        let channel_count = source.channel_count();

        let samples = source
            .read_frames(
                frames_at(self.start_offset, source_sample_rate),
                frames_at(self.note_length, source_sample_rate),
            )
            .map_err(decode_error)?;

        // Transcode if sample rate doesn't match
        let (final_samples, final_sample_rate) = if source_sample_rate != self.target_sample_rate {
            info!(
                source_rate = source_sample_rate,
                target_rate = self.target_sample_rate,
                "Transcoding note"
            );
            let transcoded = transcode_samples(
                &samples,
                channel_count,
                source_sample_rate,
                self.target_sample_rate,
            );
            (transcoded, self.target_sample_rate)
        } else {
            (samples, source_sample_rate)
        };

        let buffer = AudioBuffer::new(final_samples, channel_count, final_sample_rate);

        info!(
            path = ?path,
            channels = channel_count,
            sample_rate = final_sample_rate,
            duration_ms = buffer.duration().as_millis(),
            memory_kb = buffer.memory_size() / 1024,
            "Note loaded"
        );

        Ok(buffer)
    }

    /// Returns the notes whose recordings are missing, along with the path that was checked.
    pub fn missing(&self, notes: &[Note]) -> Vec<(Note, PathBuf)> {
        notes
            .iter()
            .map(|note| (*note, self.sample_path(*note)))
            .filter(|(_, path)| !path.is_file())
            .collect()
    }
}

impl std::fmt::Debug for NoteLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteLoader")
            .field("path", &self.path)
            .field("extension", &self.extension)
            .field("target_sample_rate", &self.target_sample_rate)
            .finish()
    }
}

/// The number of frames covering the duration at the given rate.
fn frames_at(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_secs_f64() * sample_rate as f64).round() as usize
}

/// Transcodes samples from one sample rate to another using linear interpolation.
/// Sustained single notes resample cleanly enough this way.
fn transcode_samples(
    samples: &[f32],
    channel_count: u16,
    source_rate: u32,
    target_rate: u32,
) -> Vec<f32> {
    let ratio = target_rate as f64 / source_rate as f64;
    let channels = channel_count.max(1) as usize;
    let source_frames = samples.len() / channels;
    let target_frames = (source_frames as f64 * ratio).ceil() as usize;

    let mut output = Vec::with_capacity(target_frames * channels);

    for target_frame in 0..target_frames {
        let source_pos = target_frame as f64 / ratio;
        let source_frame = source_pos.floor() as usize;
        let frac = source_pos.fract() as f32;

        for channel in 0..channels {
            let idx0 = source_frame * channels + channel;
            let idx1 = (source_frame + 1) * channels + channel;

            let s0 = samples.get(idx0).copied().unwrap_or(0.0);
            let s1 = samples.get(idx1).copied().unwrap_or(s0);

            output.push(s0 + (s1 - s0) * frac);
        }
    }

    output
}
