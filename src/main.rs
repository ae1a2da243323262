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
mod audio;
mod config;
mod controller;
mod music;
mod quiz;
mod samples;
#[cfg(test)]
mod test;
#[cfg(test)]
mod testutil;

use std::error::Error;
use std::io;

use clap::{crate_version, Parser};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use audio::Engine;
use config::Settings;
use controller::Controller;
use music::ChordGenerator;
use quiz::QuizSession;
use samples::NoteLoader;

/// Log level used when RUST_LOG isn't set.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "An ear training quiz: listen to a triad and sing the note asked for."
)]
struct Cli {
    /// Only play chords in root position.
    #[arg(long)]
    root_only: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load()?;
    let root_only = cli.root_only || settings.quiz().root_only();

    println!("Using args:");
    println!("    root_only: {}", root_only);
    println!("    device: {}", settings.audio().device());
    println!("    samples: {}", settings.samples().path().display());
    println!("    lowest_octave: {}", settings.quiz().lowest_octave());

    let device = audio::get_device(
        settings.audio().device(),
        settings.audio().playback_delay()?,
    )?;
    info!(device = device.to_string(), "Using audio device.");

    let loader = NoteLoader::new(settings.samples(), device.sample_rate())?;
    let generator = ChordGenerator::new(root_only, settings.quiz().lowest_octave());
    info!(
        path = ?loader.path(),
        root_only = generator.root_only(),
        "Checking note library."
    );
    for (note, path) in loader.missing(&generator.reachable_notes()) {
        warn!(%note, path = ?path, "Missing sample");
    }

    let session = QuizSession::new(
        generator,
        Engine::new(loader, device),
        settings.samples().answer_length()?,
    );
    Controller::new(session).run(io::stdin().lock(), io::stdout())?;

    Ok(())
}
