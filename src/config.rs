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
use std::env;
use std::time::Duration;

use config::{Config, Environment, File, Source};
use duration_string::DurationString;
use serde::Deserialize;

use crate::music::chord::MAX_LOWEST_OCTAVE;

mod audio;
mod error;
mod quiz;
mod samples;

pub use audio::Audio;
pub use error::ConfigError;
pub use quiz::Quiz;
pub use samples::Samples;

/// The config file looked up in the working directory, without extension.
const DEFAULT_CONFIG_NAME: &str = "chordquiz";

/// Environment variable naming an alternate config file.
const CONFIG_PATH_ENV: &str = "CHORDQUIZ_CONFIG";

/// Prefix for environment overrides, e.g. CHORDQUIZ_AUDIO__DEVICE.
const ENV_PREFIX: &str = "CHORDQUIZ";

/// The full configuration of the quiz.
#[derive(Deserialize, Clone, Default)]
pub struct Settings {
    /// Output device configuration.
    #[serde(default)]
    audio: Audio,

    /// Where the note samples live and how they're cut.
    #[serde(default)]
    samples: Samples,

    /// Chord generation options.
    #[serde(default)]
    quiz: Quiz,
}

impl Settings {
    /// Loads the settings from the optional config file and the environment.
    pub fn load() -> Result<Settings, ConfigError> {
        let name = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_NAME.to_string());
        Settings::build(File::with_name(&name).required(false))
    }

    /// Parses the settings from a YAML string, still honoring environment overrides.
    #[cfg(test)]
    pub fn from_yaml(yaml: &str) -> Result<Settings, ConfigError> {
        Settings::build(File::from_str(yaml, config::FileFormat::Yaml))
    }

    fn build<S>(file: S) -> Result<Settings, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Surfaces malformed durations and out of range octaves at startup rather than on
    /// first use.
    fn validate(&self) -> Result<(), ConfigError> {
        self.audio.playback_delay()?;
        self.samples.start_offset()?;
        self.samples.note_length()?;
        self.samples.answer_length()?;

        let lowest_octave = self.quiz.lowest_octave();
        if lowest_octave > MAX_LOWEST_OCTAVE {
            return Err(ConfigError::OutOfRange {
                field: "quiz.lowest_octave",
                value: lowest_octave,
                max: MAX_LOWEST_OCTAVE,
            });
        }
        Ok(())
    }

    pub fn audio(&self) -> &Audio {
        &self.audio
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }
}

/// Parses an optional duration string such as "500ms" or "1s", falling back to the default.
fn parse_duration(
    field: &'static str,
    value: &Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match value {
        Some(value) => {
            let parsed = DurationString::from_string(value.clone()).map_err(|e| {
                ConfigError::InvalidDuration {
                    field,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            Ok(parsed.into())
        }
        None => Ok(default),
    }
}
