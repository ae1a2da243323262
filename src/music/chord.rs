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

//! Triad construction.
//!
//! A chord is built from a root, a quality and an inversion. The quality gives the
//! pitch classes, the inversion rotates them, and the rotated sequence is unwrapped
//! and spread over octaves so that every voiced note sounds above the previous one.

use std::fmt;

use rand::Rng;

use super::pitch::{Note, PitchClass, SEMITONES_PER_OCTAVE};

/// The default octave of the lowest voiced note.
pub const DEFAULT_LOWEST_OCTAVE: u8 = 3;

/// The highest octave the lowest voiced note may start in. Voicings reach one octave above it.
pub const MAX_LOWEST_OCTAVE: u8 = 8;

/// The quality of a triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Augmented,
    Diminished,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 4] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Augmented,
        ChordQuality::Diminished,
    ];

    /// The semitone offsets of the third and fifth above the root.
    pub fn intervals(self) -> [u8; 2] {
        match self {
            ChordQuality::Major => [4, 7],
            ChordQuality::Minor => [3, 7],
            ChordQuality::Diminished => [3, 6],
            ChordQuality::Augmented => [4, 8],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChordQuality::Major => "MAJOR",
            ChordQuality::Minor => "MINOR",
            ChordQuality::Augmented => "AUGMENTED",
            ChordQuality::Diminished => "DIMINISHED",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which chord member sounds lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inversion {
    Root,
    First,
    Second,
}

impl Inversion {
    pub const ALL: [Inversion; 3] = [Inversion::Root, Inversion::First, Inversion::Second];

    /// The number of positions the root-position pitch classes are rotated left by.
    pub fn rotation(self) -> usize {
        match self {
            Inversion::Root => 0,
            Inversion::First => 1,
            Inversion::Second => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Inversion::Root => "ROOT",
            Inversion::First => "FIRST",
            Inversion::Second => "SECOND",
        }
    }
}

impl fmt::Display for Inversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The position of a note within the voiced chord, counted from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotePosition {
    Bottom,
    Middle,
    Top,
}

impl NotePosition {
    pub const ALL: [NotePosition; 3] = [
        NotePosition::Bottom,
        NotePosition::Middle,
        NotePosition::Top,
    ];

    /// Picks a position uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> NotePosition {
        NotePosition::ALL[rng.gen_range(0..NotePosition::ALL.len())]
    }

    /// The index of the position in ascending pitch order.
    pub fn index(self) -> usize {
        match self {
            NotePosition::Bottom => 0,
            NotePosition::Middle => 1,
            NotePosition::Top => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NotePosition::Bottom => "BOTTOM",
            NotePosition::Middle => "MIDDLE",
            NotePosition::Top => "TOP",
        }
    }
}

impl fmt::Display for NotePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A voiced triad. The notes are always strictly ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    root: PitchClass,
    quality: ChordQuality,
    inversion: Inversion,
    notes: [Note; 3],
}

impl Chord {
    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn inversion(&self) -> Inversion {
        self.inversion
    }

    /// The voiced notes from bottom to top.
    pub fn notes(&self) -> &[Note; 3] {
        &self.notes
    }

    /// Gets the note at the given position.
    pub fn note_at(&self, position: NotePosition) -> Note {
        self.notes[position.index()]
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.root, self.quality, self.inversion)
    }
}

/// Generates random triads voiced upward from a fixed lowest octave.
#[derive(Debug, Clone)]
pub struct ChordGenerator {
    /// If true, every chord is generated in root position.
    root_only: bool,
    /// The octave the bottom note is placed in.
    lowest_octave: u8,
}

impl ChordGenerator {
    /// Creates a new chord generator. The lowest octave is capped at MAX_LOWEST_OCTAVE.
    pub fn new(root_only: bool, lowest_octave: u8) -> ChordGenerator {
        ChordGenerator {
            root_only,
            lowest_octave: lowest_octave.min(MAX_LOWEST_OCTAVE),
        }
    }

    /// Returns true if inversions are disabled.
    pub fn root_only(&self) -> bool {
        self.root_only
    }

    /// Picks a random root, quality and inversion and voices the result.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Chord {
        let root = PitchClass::from_index(rng.gen_range(0..SEMITONES_PER_OCTAVE));
        let quality = ChordQuality::ALL[rng.gen_range(0..ChordQuality::ALL.len())];
        let inversion = if self.root_only {
            Inversion::Root
        } else {
            Inversion::ALL[rng.gen_range(0..Inversion::ALL.len())]
        };

        self.voice(root, quality, inversion)
    }

    /// Voices the given chord.
    pub fn voice(&self, root: PitchClass, quality: ChordQuality, inversion: Inversion) -> Chord {
        let [third, fifth] = quality.intervals();
        let mut pitch_classes = [
            root.index(),
            (root.index() + third) % SEMITONES_PER_OCTAVE,
            (root.index() + fifth) % SEMITONES_PER_OCTAVE,
        ];
        pitch_classes.rotate_left(inversion.rotation());

        Chord {
            root,
            quality,
            inversion,
            notes: assign_octaves(unwrap_ascending(pitch_classes), self.lowest_octave),
        }
    }

    /// Every note that any root, quality and inversion can produce, in ascending order.
    pub fn reachable_notes(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = PitchClass::ALL
            .into_iter()
            .flat_map(|root| {
                ChordQuality::ALL.into_iter().flat_map(move |quality| {
                    Inversion::ALL
                        .into_iter()
                        .map(move |inversion| (root, quality, inversion))
                })
            })
            .flat_map(|(root, quality, inversion)| *self.voice(root, quality, inversion).notes())
            .collect();

        notes.sort_by_key(|note| note.semitones());
        notes.dedup();
        notes
    }
}

/// Lifts each pitch class by octaves until it is no lower than its predecessor, so the
/// sequence never steps backward in pitch.
fn unwrap_ascending(pitch_classes: [u8; 3]) -> [u8; 3] {
    let mut unwrapped = pitch_classes;
    for i in 1..unwrapped.len() {
        while unwrapped[i] < unwrapped[i - 1] {
            unwrapped[i] += SEMITONES_PER_OCTAVE;
        }
    }
    unwrapped
}

/// Walks the unwrapped semitone values and assigns each one an octave, advancing the
/// octave whenever a value leaves the current octave's window.
fn assign_octaves(values: [u8; 3], lowest_octave: u8) -> [Note; 3] {
    // Octaves above the lowest; unwrapped values stay below three octaves.
    let mut offset: u8 = 0;
    values.map(|value| {
        while value >= SEMITONES_PER_OCTAVE * (offset + 1) {
            offset += 1;
        }
        let pitch_class = value - offset * SEMITONES_PER_OCTAVE;
        Note::new(PitchClass::from_index(pitch_class), lowest_octave.saturating_add(offset))
    })
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn note(pitch_class: PitchClass, octave: u8) -> Note {
        Note::new(pitch_class, octave)
    }

    fn generator() -> ChordGenerator {
        ChordGenerator::new(false, DEFAULT_LOWEST_OCTAVE)
    }

    #[test]
    fn test_c_major_root() {
        let chord = generator().voice(PitchClass::C, ChordQuality::Major, Inversion::Root);
        assert_eq!(
            &[
                note(PitchClass::C, 3),
                note(PitchClass::E, 3),
                note(PitchClass::G, 3)
            ],
            chord.notes()
        );
    }

    #[test]
    fn test_c_major_first_inversion() {
        let chord = generator().voice(PitchClass::C, ChordQuality::Major, Inversion::First);
        assert_eq!(
            &[
                note(PitchClass::E, 3),
                note(PitchClass::G, 3),
                note(PitchClass::C, 4)
            ],
            chord.notes()
        );
    }

    #[test]
    fn test_a_minor_second_inversion() {
        let chord = generator().voice(PitchClass::A, ChordQuality::Minor, Inversion::Second);
        assert_eq!(
            &[
                note(PitchClass::E, 3),
                note(PitchClass::A, 3),
                note(PitchClass::C, 4)
            ],
            chord.notes()
        );
    }

    #[test]
    fn test_b_augmented_second_inversion() {
        // B D# G -> G B D#, all of which wrap past the octave boundary.
        let chord = generator().voice(PitchClass::B, ChordQuality::Augmented, Inversion::Second);
        assert_eq!(
            &[
                note(PitchClass::G, 3),
                note(PitchClass::B, 3),
                note(PitchClass::Eb, 4)
            ],
            chord.notes()
        );
    }

    #[test]
    fn test_all_voicings_strictly_ascend() {
        let generator = generator();
        for root in PitchClass::ALL {
            for quality in ChordQuality::ALL {
                for inversion in Inversion::ALL {
                    let chord = generator.voice(root, quality, inversion);
                    let notes = chord.notes();
                    assert!(
                        notes[0].semitones() < notes[1].semitones()
                            && notes[1].semitones() < notes[2].semitones(),
                        "{} voiced as {} {} {} is not ascending",
                        chord,
                        notes[0],
                        notes[1],
                        notes[2]
                    );
                    assert_eq!(DEFAULT_LOWEST_OCTAVE, notes[0].octave());
                }
            }
        }
    }

    #[test]
    fn test_voicings_keep_quality_pitch_classes() {
        let generator = generator();
        for root in PitchClass::ALL {
            for quality in ChordQuality::ALL {
                let [third, fifth] = quality.intervals();
                let mut expected = vec![
                    root,
                    PitchClass::from_index(root.index() + third),
                    PitchClass::from_index(root.index() + fifth),
                ];
                for inversion in Inversion::ALL {
                    let voiced: Vec<PitchClass> = generator
                        .voice(root, quality, inversion)
                        .notes()
                        .iter()
                        .map(|note| note.pitch_class())
                        .collect();
                    assert_eq!(expected, voiced, "{} {} {}", root, quality, inversion);
                    expected.rotate_left(1);
                }
            }
        }
    }

    #[test]
    fn test_quality_intervals() {
        assert_eq!([4, 7], ChordQuality::Major.intervals());
        assert_eq!([3, 7], ChordQuality::Minor.intervals());
        assert_eq!([3, 6], ChordQuality::Diminished.intervals());
        assert_eq!([4, 8], ChordQuality::Augmented.intervals());
    }

    #[test]
    fn test_root_only_never_inverts() {
        let generator = ChordGenerator::new(true, DEFAULT_LOWEST_OCTAVE);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(Inversion::Root, generator.generate(&mut rng).inversion());
        }
    }

    #[test]
    fn test_random_generation_covers_inversions() {
        let generator = generator();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = Vec::new();
        for _ in 0..1000 {
            let inversion = generator.generate(&mut rng).inversion();
            if !seen.contains(&inversion) {
                seen.push(inversion);
            }
        }
        assert_eq!(3, seen.len());
    }

    #[test]
    fn test_lowest_octave_is_configurable() {
        let chord =
            ChordGenerator::new(false, 4).voice(PitchClass::C, ChordQuality::Major, Inversion::First);
        assert_eq!(
            &[
                note(PitchClass::E, 4),
                note(PitchClass::G, 4),
                note(PitchClass::C, 5)
            ],
            chord.notes()
        );
    }

    #[test]
    fn test_lowest_octave_is_capped() {
        for lowest_octave in [MAX_LOWEST_OCTAVE + 1, 254, u8::MAX] {
            let generator = ChordGenerator::new(false, lowest_octave);
            let chord = generator.voice(PitchClass::C, ChordQuality::Major, Inversion::First);
            assert_eq!(
                &[
                    note(PitchClass::E, MAX_LOWEST_OCTAVE),
                    note(PitchClass::G, MAX_LOWEST_OCTAVE),
                    note(PitchClass::C, MAX_LOWEST_OCTAVE + 1)
                ],
                chord.notes()
            );

            let notes = generator.reachable_notes();
            assert_eq!(MAX_LOWEST_OCTAVE, notes[0].octave());
            assert_eq!(MAX_LOWEST_OCTAVE + 1, notes[notes.len() - 1].octave());
        }
    }

    #[test]
    fn test_reachable_notes_span_two_octaves() {
        let notes = generator().reachable_notes();
        assert_eq!(Some(&note(PitchClass::C, 3)), notes.first());
        assert!(notes.iter().all(|note| note.octave() == 3 || note.octave() == 4));
        // Every pitch class can be the bottom note.
        assert!(PitchClass::ALL
            .iter()
            .all(|pc| notes.contains(&note(*pc, 3))));
        for pair in notes.windows(2) {
            assert!(pair[0].semitones() < pair[1].semitones());
        }
    }

    #[test]
    fn test_display() {
        let chord = generator().voice(PitchClass::Db, ChordQuality::Diminished, Inversion::First);
        assert_eq!("Db DIMINISHED FIRST", chord.to_string());
        assert_eq!("TOP", NotePosition::Top.to_string());
        assert_eq!(2, NotePosition::Top.index());
    }
}
