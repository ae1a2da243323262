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
use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Packet};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

use super::error::SampleSourceError;

/// Reads an audio file (AIFF, WAV, FLAC, MP3, etc.) and produces interleaved f32 samples
/// scaled to [-1.0, 1.0]. Decoding is done with symphonia.
pub struct AudioSampleSource {
    format_reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    channels: u16,
    sample_rate: u32,
    // Samples decoded while probing for the channel count, returned before anything else.
    primed_samples: Vec<f32>,
    is_finished: bool,
}

impl AudioSampleSource {
    /// Opens the given file and prepares a decoder for its first audio track.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SampleSourceError> {
        // Open the file (include path in error so user sees which file failed)
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SampleSourceError::IoError(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create a hint to help the format registry guess the format
        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(extension);
        }

        let file_path = path.to_string_lossy().to_string();
        let probed = get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| {
                SampleSourceError::SampleConversionFailed(format!("'{}': {}", file_path, e))
            })?;
        let mut format_reader = probed.format;

        let track = format_reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| {
                SampleSourceError::SampleConversionFailed(format!(
                    "'{}': no audio track found",
                    file_path
                ))
            })?;

        let track_id = track.id;
        let params = &track.codec_params;
        let sample_rate = params.sample_rate.ok_or_else(|| {
            SampleSourceError::SampleConversionFailed(format!(
                "'{}': sample rate not specified",
                file_path
            ))
        })?;

        let mut decoder = get_codecs()
            .make(params, &DecoderOptions::default())
            .map_err(|e| {
                SampleSourceError::SampleConversionFailed(format!("'{}': {}", file_path, e))
            })?;

        // Prefer the container's channel count. If it's missing, decode the first packet
        // to find out and keep its samples.
        let channels = params.channels.map(|c| c.count() as u16).unwrap_or(0);
        let (channels, primed_samples) = if channels > 0 {
            (channels, Vec::new())
        } else {
            match Self::read_and_decode_next_packet_for_track(
                format_reader.as_mut(),
                decoder.as_mut(),
                track_id,
            )? {
                Some((samples, channels)) => (channels as u16, samples),
                None => {
                    return Err(SampleSourceError::SampleConversionFailed(format!(
                        "'{}': channels not specified",
                        file_path
                    )))
                }
            }
        };

        Ok(AudioSampleSource {
            format_reader,
            decoder,
            track_id,
            channels,
            sample_rate,
            primed_samples,
            is_finished: false,
        })
    }

    /// Get the number of channels in this source
    pub fn channel_count(&self) -> u16 {
        self.channels
    }

    /// Get the sample rate of this source
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Skips `skip_frames` frames and then reads up to `max_frames` frames as interleaved
    /// samples. Returns fewer frames if the file ends first.
    pub fn read_frames(
        &mut self,
        skip_frames: usize,
        max_frames: usize,
    ) -> Result<Vec<f32>, SampleSourceError> {
        let channels = self.channels as usize;
        let mut to_skip = skip_frames * channels;
        let wanted = max_frames * channels;
        let mut samples = Vec::with_capacity(wanted);

        while samples.len() < wanted {
            let decoded = match self.next_packet_samples()? {
                Some(decoded) => decoded,
                None => break,
            };

            let skipped = to_skip.min(decoded.len());
            to_skip -= skipped;
            let remaining = &decoded[skipped..];

            let to_take = (wanted - samples.len()).min(remaining.len());
            samples.extend_from_slice(&remaining[..to_take]);
        }

        Ok(samples)
    }

    /// Returns the samples of the next decoded packet, or None at the end of the file.
    fn next_packet_samples(&mut self) -> Result<Option<Vec<f32>>, SampleSourceError> {
        if !self.primed_samples.is_empty() {
            return Ok(Some(std::mem::take(&mut self.primed_samples)));
        }
        if self.is_finished {
            return Ok(None);
        }

        match Self::read_and_decode_next_packet_for_track(
            self.format_reader.as_mut(),
            self.decoder.as_mut(),
            self.track_id,
        )? {
            Some((samples, _)) => Ok(Some(samples)),
            None => {
                self.is_finished = true;
                Ok(None)
            }
        }
    }

    /// Reads the next packet. Returns `Ok(None)` at the end of the file.
    ///
    /// Note: ResetRequired errors are propagated to callers so they can reset the decoder.
    fn read_next_packet(
        format_reader: &mut dyn FormatReader,
    ) -> Result<Option<Packet>, SampleSourceError> {
        match format_reader.next_packet() {
            Ok(packet) => Ok(Some(packet)),
            Err(SymphoniaError::ResetRequired) => {
                Err(SampleSourceError::AudioError(SymphoniaError::ResetRequired))
            }
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Ok(None)
            }
            // Some decoders return DecodeError at EOF instead of IoError
            Err(SymphoniaError::DecodeError(_)) => Ok(None),
            Err(e) => Err(SampleSourceError::AudioError(e)),
        }
    }

    /// Reads and decodes the next packet for the given track, resetting the decoder when
    /// asked to. Returns the interleaved samples and their channel count.
    fn read_and_decode_next_packet_for_track(
        format_reader: &mut dyn FormatReader,
        decoder: &mut dyn Decoder,
        track_id: u32,
    ) -> Result<Option<(Vec<f32>, usize)>, SampleSourceError> {
        loop {
            let packet = match Self::read_next_packet(format_reader) {
                Ok(Some(packet)) => packet,
                Ok(None) => return Ok(None),
                Err(SampleSourceError::AudioError(SymphoniaError::ResetRequired)) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => return Err(e),
            };
            if packet.track_id() != track_id {
                continue;
            }
            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    decoder.decode(&packet)?
                }
                Err(e) => return Err(SampleSourceError::AudioError(e)),
            };
            let (samples, channels) = Self::decode_buffer_to_f32(decoded);
            // Header packets (e.g. Vorbis) can decode to nothing.
            if channels > 0 && !samples.is_empty() {
                return Ok(Some((samples, channels)));
            }
        }
    }

    /// Converts a decoded buffer to interleaved f32 samples and its channel count.
    fn decode_buffer_to_f32(decoded: AudioBufferRef) -> (Vec<f32>, usize) {
        match decoded {
            AudioBufferRef::F32(buf) => Self::interleave_planar_samples(&buf, |sample| sample),
            AudioBufferRef::F64(buf) => Self::interleave_planar_samples(&buf, |sample| sample as f32),
            AudioBufferRef::S8(buf) => Self::interleave_planar_samples(&buf, Self::scale_s8),
            AudioBufferRef::S16(buf) => Self::interleave_planar_samples(&buf, Self::scale_s16),
            AudioBufferRef::S24(buf) => {
                Self::interleave_planar_samples(&buf, |sample| Self::scale_s24(sample.inner()))
            }
            AudioBufferRef::S32(buf) => Self::interleave_planar_samples(&buf, Self::scale_s32),
            AudioBufferRef::U8(buf) => Self::interleave_planar_samples(&buf, Self::scale_u8),
            AudioBufferRef::U16(buf) => Self::interleave_planar_samples(&buf, Self::scale_u16),
            AudioBufferRef::U24(buf) => {
                Self::interleave_planar_samples(&buf, |sample| Self::scale_u24(sample.inner()))
            }
            AudioBufferRef::U32(buf) => Self::interleave_planar_samples(&buf, Self::scale_u32),
        }
    }

    fn interleave_planar_samples<T, F>(buf: &AudioBuffer<T>, convert: F) -> (Vec<f32>, usize)
    where
        T: symphonia::core::sample::Sample,
        F: Fn(T) -> f32,
    {
        let frames = buf.frames();
        let channels = buf.spec().channels.count();
        let planes = buf.planes();
        let mut samples = Vec::with_capacity(frames * channels);
        for frame_idx in 0..frames {
            for ch_idx in 0..channels {
                samples.push(convert(planes.planes()[ch_idx][frame_idx]));
            }
        }
        (samples, channels)
    }

    #[inline]
    pub(crate) fn scale_s8(sample: i8) -> f32 {
        sample as f32 / (1i64 << 7) as f32
    }

    #[inline]
    pub(crate) fn scale_s16(sample: i16) -> f32 {
        sample as f32 / (1i64 << 15) as f32
    }

    #[inline]
    pub(crate) fn scale_s24(sample: i32) -> f32 {
        sample as f32 / (1i64 << 23) as f32
    }

    #[inline]
    pub(crate) fn scale_s32(sample: i32) -> f32 {
        sample as f32 / (1i64 << 31) as f32
    }

    #[inline]
    pub(crate) fn scale_u8(sample: u8) -> f32 {
        (sample as f32 / u8::MAX as f32) * 2.0 - 1.0
    }

    #[inline]
    pub(crate) fn scale_u16(sample: u16) -> f32 {
        (sample as f32 / u16::MAX as f32) * 2.0 - 1.0
    }

    #[inline]
    pub(crate) fn scale_u24(sample: u32) -> f32 {
        let max = (1u32 << 24) - 1;
        (sample as f32 / max as f32) * 2.0 - 1.0
    }

    #[inline]
    pub(crate) fn scale_u32(sample: u32) -> f32 {
        (sample as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}
