// SPDX-License-Identifier: GPL-3.0-or-later

//! Line based operator prompts.

use std::io::{self, BufRead, Write};

/// Asks questions on `output` and reads answers from `input`.
pub struct Console<R, W> {
    /// Where answers are read from.
    input: R,

    /// Where questions are written to.
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wraps an input and output pair, e.g. locked stdin and stdout.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Shows `prompt` and returns the answer without its line ending, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }

    /// Like [`Console::ask`], treating end of input as an empty answer.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask_or_empty(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.ask(prompt)?.unwrap_or_default())
    }

    /// Asks a yes/no question. Only `y` or `Y` (surrounding whitespace ignored) counts as yes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{prompt} (Y/N): "))?;
        Ok(matches!(answer, Some(a) if a.trim().eq_ignore_ascii_case("y")))
    }

    /// Writes a line of text for the operator.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Returns the wrapped input and output.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
