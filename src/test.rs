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
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;

use crate::audio::{mock, Engine};
use crate::controller::{Controller, HELP};
use crate::music::chord::DEFAULT_LOWEST_OCTAVE;
use crate::music::ChordGenerator;
use crate::quiz::QuizSession;
use crate::samples::NoteLoader;
use crate::testutil::{test_samples_config, write_note_library};

#[test]
fn test_quiz_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let tempdir = tempdir()?;
    let generator = ChordGenerator::new(false, DEFAULT_LOWEST_OCTAVE);
    write_note_library(
        tempdir.path(),
        &generator.reachable_notes(),
        44100,
        Duration::from_millis(500),
    )?;

    let device = mock::Device::get("mock-device");
    let loader = NoteLoader::new(&test_samples_config(tempdir.path()), 44100)?;
    let session = QuizSession::new(
        generator,
        Engine::new(loader, Arc::new(device.clone())),
        Duration::from_millis(100),
    )
    .with_seed(42);

    let input = "a\np\nr\na\nx\nh\nq\np\n";
    let mut output = Vec::new();
    Controller::new(session).run(BufReader::new(input.as_bytes()), &mut output)?;
    let output = String::from_utf8(output)?;

    // Answer before the first chord only reports an error.
    assert!(output.contains("Error: no chords played yet! Press p to play a chord."));
    assert_eq!(2, output.matches("Sing the ").count());
    assert_eq!(1, output.matches(" inversion ").count());
    assert!(output.contains(&format!("Invalid input.\n{}\n", HELP)));
    assert_eq!(2, output.matches(HELP).count());

    // Play, repeat and answer; nothing after quit.
    assert_eq!(3, device.play_count());
    assert_eq!(4410, device.last_played().unwrap().frames());

    Ok(())
}

#[test]
fn test_quiz_with_missing_samples() -> Result<(), Box<dyn std::error::Error>> {
    let tempdir = tempdir()?;
    let generator = ChordGenerator::new(true, DEFAULT_LOWEST_OCTAVE);

    let device = mock::Device::get("mock-device");
    let loader = NoteLoader::new(&test_samples_config(tempdir.path()), 44100)?;
    assert_eq!(
        generator.reachable_notes().len(),
        loader.missing(&generator.reachable_notes()).len()
    );

    let session = QuizSession::new(
        generator,
        Engine::new(loader, Arc::new(device.clone())),
        Duration::from_millis(100),
    );
    let mut output = Vec::new();
    Controller::new(session).run(BufReader::new("p\nr\n".as_bytes()), &mut output)?;
    let output = String::from_utf8(output)?;

    assert!(output.contains("Error: no sample for "));
    assert!(output.contains("Error: no chords played yet! Press p to play a chord."));
    assert_eq!(0, device.play_count());

    Ok(())
}
