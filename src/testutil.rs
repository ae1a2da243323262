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
use std::{error::Error, f32::consts::PI, fs::File, path::Path, path::PathBuf, time::Duration};

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::config::Samples;
use crate::music::Note;

/// Writes a 32-bit float WAV file. Each inner Vec is one channel; channels are interleaved
/// when written.
pub fn write_wav(
    path: PathBuf,
    samples: Vec<Vec<f32>>,
    sample_rate: u32,
) -> Result<(), Box<dyn Error>> {
    write_wav_with_bits(path, samples, sample_rate, 32)
}

/// Writes a WAV file with the given bit depth. Float samples produce a float WAV, integer
/// samples an integer one.
pub fn write_wav_with_bits<S: hound::Sample + Copy + 'static>(
    path: PathBuf,
    samples: Vec<Vec<S>>,
    sample_rate: u32,
    bits_per_sample: u16,
) -> Result<(), Box<dyn Error>> {
    let tempwav = File::create(path)?;

    let sample_format = if std::any::TypeId::of::<S>() == std::any::TypeId::of::<f32>() {
        SampleFormat::Float
    } else if std::any::TypeId::of::<S>() == std::any::TypeId::of::<i32>()
        || std::any::TypeId::of::<S>() == std::any::TypeId::of::<i16>()
    {
        SampleFormat::Int
    } else {
        return Err("Unsupported sample format".into());
    };

    let num_channels = samples.len();
    assert!(num_channels <= u16::MAX.into(), "Too many channels!");
    let mut writer = WavWriter::new(
        tempwav,
        WavSpec {
            channels: num_channels as u16,
            sample_rate,
            bits_per_sample,
            sample_format,
        },
    )?;

    let frames = samples.iter().map(|channel| channel.len()).min().unwrap_or(0);
    for frame in 0..frames {
        for channel in samples.iter() {
            writer.write_sample(channel[frame])?;
        }
    }
    writer.finalize()?;

    Ok(())
}

/// Writes a mono sine tone WAV for every given note into the directory, named the way the
/// note loader expects ("Db3.wav").
pub fn write_note_library(
    dir: &Path,
    notes: &[Note],
    sample_rate: u32,
    length: Duration,
) -> Result<(), Box<dyn Error>> {
    for note in notes {
        // A4 is 57 semitones above C0.
        let frequency = 440.0 * 2.0f32.powf((note.semitones() as f32 - 57.0) / 12.0);
        let frame_count = (length.as_secs_f32() * sample_rate as f32) as usize;
        let tone: Vec<f32> = (0..frame_count)
            .map(|i| 0.25 * (2.0 * PI * frequency * i as f32 / sample_rate as f32).sin())
            .collect();
        write_wav(dir.join(format!("{}.wav", note)), vec![tone], sample_rate)?;
    }

    Ok(())
}

/// Sample settings pointing at a WAV library in the given directory, with short offsets so
/// tests stay fast.
pub fn test_samples_config(dir: &Path) -> Samples {
    Samples::new(dir.to_string_lossy().as_ref(), "wav")
        .with_timing("100ms", "300ms", "100ms")
}
