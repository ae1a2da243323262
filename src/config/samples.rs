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

use serde::Deserialize;

use super::{parse_duration, ConfigError};

const DEFAULT_PATH: &str = "notes";
const DEFAULT_EXTENSION: &str = "aiff";
const DEFAULT_START_OFFSET: Duration = Duration::from_secs(1);
const DEFAULT_NOTE_LENGTH: Duration = Duration::from_secs(3);
const DEFAULT_ANSWER_LENGTH: Duration = Duration::from_secs(1);

/// Where the note recordings live and which part of each recording is used.
#[derive(Deserialize, Clone, Default)]
pub struct Samples {
    /// Directory holding one file per note, named like "Db3.aiff".
    path: Option<String>,

    /// File extension of the recordings, without the dot.
    extension: Option<String>,

    /// Leading silence skipped at the start of every recording.
    start_offset: Option<String>,

    /// How much of each recording is kept after the offset.
    note_length: Option<String>,

    /// How long the target note plays when the answer is revealed.
    answer_length: Option<String>,
}

impl Samples {
    #[cfg(test)]
    pub fn new(path: &str, extension: &str) -> Samples {
        Samples {
            path: Some(path.to_string()),
            extension: Some(extension.to_string()),
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn with_timing(mut self, start_offset: &str, note_length: &str, answer_length: &str) -> Samples {
        self.start_offset = Some(start_offset.to_string());
        self.note_length = Some(note_length.to_string());
        self.answer_length = Some(answer_length.to_string());
        self
    }

    pub fn path(&self) -> PathBuf {
        Path::new(self.path.as_deref().unwrap_or(DEFAULT_PATH)).to_path_buf()
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    pub fn start_offset(&self) -> Result<Duration, ConfigError> {
        parse_duration("samples.start_offset", &self.start_offset, DEFAULT_START_OFFSET)
    }

    pub fn note_length(&self) -> Result<Duration, ConfigError> {
        parse_duration("samples.note_length", &self.note_length, DEFAULT_NOTE_LENGTH)
    }

    pub fn answer_length(&self) -> Result<Duration, ConfigError> {
        parse_duration("samples.answer_length", &self.answer_length, DEFAULT_ANSWER_LENGTH)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_with_timing() {
        let samples = Samples::new("/tmp/notes", "wav").with_timing("0s", "2s", "250ms");

        assert_eq!(PathBuf::from("/tmp/notes"), samples.path());
        assert_eq!("wav", samples.extension());
        assert_eq!(Duration::ZERO, samples.start_offset().unwrap());
        assert_eq!(Duration::from_secs(2), samples.note_length().unwrap());
        assert_eq!(Duration::from_millis(250), samples.answer_length().unwrap());
    }

    #[test]
    fn test_bad_duration_names_field() {
        let samples = Samples::new("notes", "aiff").with_timing("soon", "1s", "1s");

        match samples.start_offset() {
            Err(ConfigError::InvalidDuration { field, value, .. }) => {
                assert_eq!("samples.start_offset", field);
                assert_eq!("soon", value);
            }
            _ => panic!("expected an invalid duration"),
        }
    }
}
