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
use std::{fmt, thread, time::Duration};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info, span, Level};

use super::{AudioBuffer, AudioError};

/// How long to keep the stream open after the last frame was handed to the device, so the
/// host buffer plays out before the stream is dropped.
const DRAIN_TIME: Duration = Duration::from_millis(200);

/// A cpal output device along with the stream config buffers are played with.
pub struct Device {
    /// The name of the device.
    name: String,

    /// Controls how long to wait before playback starts.
    playback_delay: Duration,

    /// The underlying cpal device.
    device: cpal::Device,

    /// The stream config every buffer is played with.
    config: cpal::StreamConfig,

    /// The native sample format of the device.
    sample_format: cpal::SampleFormat,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Channels={}, Rate={}Hz) (cpal)",
            self.name, self.config.channels, self.config.sample_rate.0
        )
    }
}

impl Device {
    /// Gets the given cpal device. "default" selects the default output of the default host.
    pub fn get(name: &str, playback_delay: Duration) -> Result<Device, AudioError> {
        let device = if name == "default" {
            cpal::default_host()
                .default_output_device()
                .ok_or_else(|| AudioError::DeviceNotFound(name.to_string()))?
        } else {
            Device::find_cpal_device(name)?
        };

        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        let device_name = device.name().unwrap_or_else(|_| name.to_string());

        Ok(Device {
            name: device_name,
            playback_delay,
            device,
            config: supported.config(),
            sample_format: supported.sample_format(),
        })
    }

    /// Searches every host for an output device with the given name.
    fn find_cpal_device(name: &str) -> Result<cpal::Device, AudioError> {
        // Suppress noisy output here.
        let _shh_stdout = shh::stdout().map_err(|e| AudioError::Device(e.to_string()))?;
        let _shh_stderr = shh::stderr().map_err(|e| AudioError::Device(e.to_string()))?;

        for host_id in cpal::available_hosts() {
            let host = match cpal::host_from_id(host_id) {
                Ok(host) => host,
                Err(e) => {
                    error!(err = e.to_string(), host = host_id.name(), "Unable to open host");
                    continue;
                }
            };
            let host_devices = match host.output_devices() {
                Ok(host_devices) => host_devices,
                Err(e) => {
                    error!(
                        err = e.to_string(),
                        host = host_id.name(),
                        "Unable to list devices for host"
                    );
                    continue;
                }
            };

            for device in host_devices {
                if device.name().is_ok_and(|device_name| device_name.trim() == name) {
                    return Ok(device);
                }
            }
        }

        Err(AudioError::DeviceNotFound(name.to_string()))
    }

    /// Builds an output stream that plays the buffer once and reports completion.
    fn build_stream<T>(
        &self,
        buffer: &AudioBuffer,
        done: crossbeam_channel::Sender<Result<(), String>>,
    ) -> Result<cpal::Stream, AudioError>
    where
        T: cpal::SizedSample + cpal::FromSample<f32>,
    {
        let mut cursor = PlaybackCursor::new(buffer.clone(), self.config.channels);
        let data_done = done.clone();
        let mut temp = Vec::new();

        self.device
            .build_output_stream(
                &self.config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    temp.resize(data.len(), 0.0f32);
                    let finished = cursor.fill(&mut temp);

                    // Convert to output format
                    for (dst, &src) in data.iter_mut().zip(temp.iter()) {
                        *dst = T::from_sample(src);
                    }

                    if finished {
                        let _ = data_done.try_send(Ok(()));
                    }
                },
                move |err| {
                    let _ = done.try_send(Err(err.to_string()));
                },
                None,
            )
            .map_err(|e| AudioError::Device(e.to_string()))
    }
}

impl super::Device for Device {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Plays the buffer through the device and blocks until it has played out.
    fn play(&self, buffer: &AudioBuffer) -> Result<(), AudioError> {
        let span = span!(Level::INFO, "play buffer (cpal)");
        let _enter = span.enter();

        if buffer.sample_rate() != self.sample_rate() {
            return Err(AudioError::FormatMismatch(format!(
                "buffer is {}Hz, device {} plays {}Hz",
                buffer.sample_rate(),
                self.name,
                self.sample_rate()
            )));
        }

        info!(
            device = self.name,
            duration_ms = buffer.duration().as_millis(),
            channels = buffer.channel_count(),
            "Playing buffer."
        );

        spin_sleep::sleep(self.playback_delay);

        let (done_tx, done_rx) = crossbeam_channel::bounded(2);
        let stream = match self.sample_format {
            cpal::SampleFormat::F32 => self.build_stream::<f32>(buffer, done_tx)?,
            cpal::SampleFormat::I16 => self.build_stream::<i16>(buffer, done_tx)?,
            cpal::SampleFormat::U16 => self.build_stream::<u16>(buffer, done_tx)?,
            cpal::SampleFormat::I32 => self.build_stream::<i32>(buffer, done_tx)?,
            format => {
                return Err(AudioError::Device(format!(
                    "unsupported sample format {:?}",
                    format
                )))
            }
        };

        stream
            .play()
            .map_err(|e| AudioError::Playback(e.to_string()))?;

        let result = done_rx
            .recv()
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        thread::sleep(DRAIN_TIME);
        drop(stream);

        result.map_err(AudioError::Playback)
    }
}

/// Walks through a buffer one device callback at a time, spreading the buffer's channels
/// over the device's channels.
struct PlaybackCursor {
    buffer: AudioBuffer,
    frame: usize,
    output_channels: usize,
    finished: bool,
}

impl PlaybackCursor {
    fn new(buffer: AudioBuffer, output_channels: u16) -> PlaybackCursor {
        PlaybackCursor {
            buffer,
            frame: 0,
            output_channels: output_channels.max(1) as usize,
            finished: false,
        }
    }

    /// Fills the interleaved output with the next frames, zero-filling past the end of the
    /// buffer. Returns true the first time the buffer runs out.
    fn fill(&mut self, output: &mut [f32]) -> bool {
        let source_channels = self.buffer.channel_count().max(1) as usize;
        let source_frames = self.buffer.frames();
        let samples = self.buffer.samples();

        for out_frame in output.chunks_mut(self.output_channels) {
            if self.frame >= source_frames {
                out_frame.fill(0.0);
                continue;
            }
            let start = self.frame * source_channels;
            for (ch, out) in out_frame.iter_mut().enumerate() {
                *out = samples[start + ch % source_channels];
            }
            self.frame += 1;
        }

        if self.frame >= source_frames && !self.finished {
            self.finished = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cursor_spreads_mono_over_stereo() {
        let buffer = AudioBuffer::new(vec![0.1, 0.2, 0.3], 1, 44100);
        let mut cursor = PlaybackCursor::new(buffer, 2);

        let mut output = [1.0f32; 4];
        assert!(!cursor.fill(&mut output));
        assert_eq!([0.1, 0.1, 0.2, 0.2], output);

        let mut output = [1.0f32; 4];
        assert!(cursor.fill(&mut output));
        assert_eq!([0.3, 0.3, 0.0, 0.0], output);

        // Only the first exhausted callback reports completion.
        let mut output = [1.0f32; 4];
        assert!(!cursor.fill(&mut output));
        assert_eq!([0.0; 4], output);
    }

    #[test]
    fn test_cursor_stereo_passthrough() {
        let buffer = AudioBuffer::new(vec![0.1, -0.1, 0.2, -0.2], 2, 44100);
        let mut cursor = PlaybackCursor::new(buffer, 2);

        let mut output = [0.0f32; 4];
        assert!(cursor.fill(&mut output));
        assert_eq!([0.1, -0.1, 0.2, -0.2], output);
    }

    #[test]
    fn test_cursor_empty_buffer() {
        let buffer = AudioBuffer::new(Vec::new(), 1, 44100);
        let mut cursor = PlaybackCursor::new(buffer, 2);

        let mut output = [1.0f32; 2];
        assert!(cursor.fill(&mut output));
        assert_eq!([0.0; 2], output);
    }
}
