//! Line-oriented console I/O
//!
//! Every interactive flow reads and writes through `Console`, so the same flow
//! runs against the terminal or against a scripted transcript in tests.

use std::io::{self, BufRead, Write};

/// Prompted line input plus plain text output
pub trait Console {
    /// Show `prompt` and read one line, without the trailing newline
    ///
    /// # Errors
    /// Returns an I/O error if input fails; closed input is
    /// `io::ErrorKind::UnexpectedEof`.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Print `text` followed by a newline
    fn say(&mut self, text: &str);
}

/// Console over process stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Console that replays canned input and records everything shown
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: std::collections::VecDeque<String>,
    /// Error kind returned once the inputs run out
    end: Option<io::ErrorKind>,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            end: None,
            transcript: Vec::new(),
        }
    }

    /// Fail with `kind` instead of end of input after the last line
    #[must_use]
    pub fn ending_with(mut self, kind: io::ErrorKind) -> Self {
        self.end = Some(kind);
        self
    }

    /// Whether any recorded output line contains `needle`
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.transcript.push(prompt.to_string());
        let end = self.end.unwrap_or(io::ErrorKind::UnexpectedEof);
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(end, "script exhausted"))
    }

    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }
}
