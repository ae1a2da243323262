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
use std::io;

use super::Command;

const PLAY: &str = "p";
const REPEAT: &str = "r";
const ANSWER: &str = "a";
const HELP: &str = "h";
const QUIT: &str = "q";

pub const PROMPT: &str = "Enter a command (h for help): ";

/// One line read from the keyboard.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Unrecognized(String),
    Eof,
}

/// Prompts for and reads a single command.
pub fn read_input<R, W>(reader: &mut R, writer: &mut W) -> Result<Input, io::Error>
where
    R: io::BufRead,
    W: io::Write,
{
    write!(writer, "{}", PROMPT)?;
    writer.flush()?;
    let mut input: String = String::default();
    if reader.read_line(&mut input)? == 0 {
        return Ok(Input::Eof);
    }

    let input = input.trim().to_lowercase();
    Ok(match input.as_str() {
        PLAY => Input::Command(Command::Play),
        REPEAT => Input::Command(Command::Repeat),
        ANSWER => Input::Command(Command::Answer),
        HELP => Input::Command(Command::Help),
        QUIT => Input::Command(Command::Quit),
        _ => Input::Unrecognized(input),
    })
}
