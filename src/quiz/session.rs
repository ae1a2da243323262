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
use std::io::Write;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::QuizError;
use crate::audio::{AudioBuffer, AudioEngine};
use crate::music::{Chord, ChordGenerator, NotePosition};

/// A played chord and everything needed to repeat or reveal it.
struct Round {
    chord: Chord,
    target: NotePosition,
    /// The individual note renders, bottom to top.
    notes: [AudioBuffer; 3],
    /// The three notes overlaid.
    mix: AudioBuffer,
}

enum State {
    NoChordYet,
    ChordReady(Round),
}

/// Runs quiz rounds against an audio engine.
pub struct QuizSession<E: AudioEngine> {
    generator: ChordGenerator,
    engine: E,
    answer_length: Duration,
    rng: StdRng,
    state: State,
}

impl<E: AudioEngine> QuizSession<E> {
    pub fn new(generator: ChordGenerator, engine: E, answer_length: Duration) -> QuizSession<E> {
        QuizSession {
            generator,
            engine,
            answer_length,
            rng: StdRng::from_entropy(),
            state: State::NoChordYet,
        }
    }

    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> QuizSession<E> {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Generates a new chord, plays it and asks for one of its notes. The previous round is
    /// only replaced once all three notes have loaded and been mixed.
    pub fn play_new_chord<W: Write>(&mut self, out: &mut W) -> Result<(), QuizError> {
        let chord = self.generator.generate(&mut self.rng);
        info!(chord = %chord, "Generated chord.");

        let [bottom, middle, top] = *chord.notes();
        let notes = [
            self.engine.load_note(bottom)?,
            self.engine.load_note(middle)?,
            self.engine.load_note(top)?,
        ];
        let mix = self.engine.overlay(&notes)?;
        let target = NotePosition::random(&mut self.rng);
        debug!(target = target.as_str(), "Picked target note.");

        self.state = State::ChordReady(Round {
            chord,
            target,
            notes,
            mix,
        });

        self.repeat_chord(out)
    }

    /// Asks for the same note again and replays the current chord.
    pub fn repeat_chord<W: Write>(&mut self, out: &mut W) -> Result<(), QuizError> {
        let round = self.current_round()?;

        writeln!(out, "Sing the {} note.", round.target.as_str())?;
        out.flush()?;
        self.engine.play(&round.mix)?;
        Ok(())
    }

    /// Names the chord and the target note, then plays the target note on its own.
    pub fn reveal_answer<W: Write>(&mut self, out: &mut W) -> Result<(), QuizError> {
        let round = self.current_round()?;
        info!(note = %round.chord.note_at(round.target), "Revealing answer.");

        writeln!(
            out,
            "{} {} {} inversion {} note",
            round.chord.root(),
            round.chord.quality(),
            round.chord.inversion(),
            round.target.as_str()
        )?;
        out.flush()?;
        let answer = self
            .engine
            .truncate(&round.notes[round.target.index()], self.answer_length);
        self.engine.play(&answer)?;
        Ok(())
    }

    fn current_round(&self) -> Result<&Round, QuizError> {
        match &self.state {
            State::ChordReady(round) => Ok(round),
            State::NoChordYet => Err(QuizError::NoChordYet),
        }
    }

    #[cfg(test)]
    fn round(&self) -> Option<&Round> {
        self.current_round().ok()
    }
}
