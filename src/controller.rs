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
use std::io::{self, BufRead, Write};

use tracing::{error, info, span, warn, Level};

use crate::audio::AudioEngine;
use crate::quiz::{QuizError, QuizSession};

pub mod keyboard;

use keyboard::Input;

/// The commands understood by the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Plays a new chord.
    Play,

    /// Replays the current chord.
    Repeat,

    /// Reveals the current chord and plays the target note.
    Answer,

    /// Prints the help text.
    Help,

    /// Ends the quiz.
    Quit,
}

/// The help text printed for h and after unrecognized input.
pub const HELP: &str = concat!(
    "Commands: \n",
    "    p - play_chord\n",
    "    r - repeat_chord\n",
    "    a - print_answer\n",
    "    h - print_help\n",
    "    q - quit"
);

/// Drives a quiz session from the keyboard.
pub struct Controller<E: AudioEngine> {
    session: QuizSession<E>,
}

impl<E: AudioEngine> Controller<E> {
    pub fn new(session: QuizSession<E>) -> Controller<E> {
        Controller { session }
    }

    /// Reads commands until quit or end of input. Quiz errors are reported and the loop
    /// carries on; only terminal I/O errors end it early.
    pub fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), io::Error>
    where
        R: BufRead,
        W: Write,
    {
        let span = span!(Level::INFO, "controller");
        let _enter = span.enter();

        info!("Controller started.");

        loop {
            match keyboard::read_input(&mut reader, &mut writer)? {
                Input::Command(Command::Quit) | Input::Eof => {
                    info!("Controller closing.");
                    return Ok(());
                }
                Input::Command(command) => {
                    info!(command = format!("{:?}", command), "Received command.");
                    self.handle(command, &mut writer)?;
                }
                Input::Unrecognized(input) => {
                    warn!(input = input, "Unrecognized input");
                    writeln!(writer, "Invalid input.")?;
                    writeln!(writer, "{}", HELP)?;
                }
            }
        }
    }

    fn handle<W: Write>(&mut self, command: Command, writer: &mut W) -> Result<(), io::Error> {
        let result = match command {
            Command::Play => self.session.play_new_chord(writer),
            Command::Repeat => self.session.repeat_chord(writer),
            Command::Answer => self.session.reveal_answer(writer),
            Command::Help => writeln!(writer, "{}", HELP).map_err(QuizError::from),
            Command::Quit => Ok(()),
        };

        match result {
            Ok(()) => Ok(()),
            Err(QuizError::Io(e)) => Err(e),
            Err(e @ QuizError::NoChordYet) => writeln!(writer, "Error: {}", e),
            Err(e) => {
                error!(err = e.to_string(), "Quiz command failed");
                writeln!(writer, "Error: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::BufReader;
    use std::time::Duration;

    use super::*;
    use crate::audio::{AudioBuffer, AudioError};
    use crate::music::chord::DEFAULT_LOWEST_OCTAVE;
    use crate::music::{ChordGenerator, Note};

    /// An engine without a sample library: every load fails.
    struct EmptyLibrary;

    impl AudioEngine for EmptyLibrary {
        fn load_note(&self, note: Note) -> Result<AudioBuffer, AudioError> {
            Err(AudioError::SampleNotFound {
                note,
                path: format!("notes/{}.aiff", note).into(),
            })
        }

        fn overlay(&self, _: &[AudioBuffer]) -> Result<AudioBuffer, AudioError> {
            Err(AudioError::FormatMismatch("nothing to overlay".to_string()))
        }

        fn play(&self, _: &AudioBuffer) -> Result<(), AudioError> {
            Ok(())
        }

        fn truncate(&self, buffer: &AudioBuffer, _: Duration) -> AudioBuffer {
            buffer.clone()
        }
    }

    fn run(input: &str) -> String {
        let session = QuizSession::new(
            ChordGenerator::new(false, DEFAULT_LOWEST_OCTAVE),
            EmptyLibrary,
            Duration::from_secs(1),
        );
        let mut output = Vec::new();
        Controller::new(session)
            .run(BufReader::new(input.as_bytes()), &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_help() {
        let output = run("h\nq\n");
        assert!(output.contains(HELP));
        assert!(!output.contains("Invalid input."));
    }

    #[test]
    fn test_invalid_input_prints_help() {
        let output = run("sing\n");
        assert!(output.contains(&format!("Invalid input.\n{}\n", HELP)));
    }

    #[test]
    fn test_no_chord_yet() {
        let output = run("r\na\n");
        assert_eq!(
            2,
            output
                .matches("Error: no chords played yet! Press p to play a chord.")
                .count()
        );
    }

    #[test]
    fn test_audio_errors_keep_the_loop_going() {
        let output = run("p\nh\nq\n");
        assert!(output.contains("Error: no sample for"));
        assert!(output.contains(HELP));
    }

    #[test]
    fn test_quit_stops_reading() {
        let output = run("q\nh\n");
        assert!(!output.contains(HELP));
        assert_eq!(keyboard::PROMPT, output);
    }
}
