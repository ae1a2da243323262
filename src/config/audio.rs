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
use std::time::Duration;

use serde::Deserialize;

use super::{parse_duration, ConfigError};

const DEFAULT_DEVICE: &str = "default";
const DEFAULT_AUDIO_PLAYBACK_DELAY: Duration = Duration::ZERO;

/// A YAML representation of the audio configuration.
#[derive(Deserialize, Clone, Default)]
pub struct Audio {
    /// The audio device. "default" picks the host's default output.
    device: Option<String>,

    /// Controls how long to wait before playback starts.
    playback_delay: Option<String>,
}

impl Audio {
    /// New will create a new Audio configuration.
    #[cfg(test)]
    pub fn new(device: &str) -> Audio {
        Audio {
            device: Some(device.to_string()),
            playback_delay: None,
        }
    }

    /// Returns the device from the configuration.
    pub fn device(&self) -> &str {
        self.device.as_deref().unwrap_or(DEFAULT_DEVICE)
    }

    /// Returns the playback delay from the configuration.
    pub fn playback_delay(&self) -> Result<Duration, ConfigError> {
        parse_duration(
            "audio.playback_delay",
            &self.playback_delay,
            DEFAULT_AUDIO_PLAYBACK_DELAY,
        )
    }
}
