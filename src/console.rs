//! Interactive console I/O.
//!
//! All user prompting goes through an explicitly passed [`Console`] rather
//! than a process-wide readline handle, so the resolution logic can run
//! under test with a scripted input source.

use std::io::{self, BufRead, BufReader, Write};

/// Input/output context for interactive prompts.
pub struct Console<'a> {
    input: Box<dyn BufRead + 'a>,
    output: Box<dyn Write + 'a>,
}

/// Answer to a selection prompt that also accepts free-form text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Zero-based index into the offered list.
    Index(usize),
    /// Manually entered value.
    Text(String),
}

impl Console<'static> {
    /// Console attached to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self { input: Box::new(BufReader::new(io::stdin())), output: Box::new(io::stdout()) }
    }
}

impl<'a> Console<'a> {
    /// Console over arbitrary input/output, used to script prompts in tests.
    pub fn new(input: impl BufRead + 'a, output: impl Write + 'a) -> Self {
        Self { input: Box::new(input), output: Box::new(output) }
    }

    /// Print a line to the user.
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Ask a question; empty input returns the default.
    pub fn prompt(&mut self, question: &str, default: &str) -> io::Result<String> {
        if default.is_empty() {
            write!(self.output, "{}: ", question)?;
        } else {
            write!(self.output, "{} ({}): ", question, default)?;
        }
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        let answer = answer.trim();

        Ok(if answer.is_empty() { default.to_string() } else { answer.to_string() })
    }

    /// Yes/no question, defaulting to no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("{} (y/N)", question), "N")?;
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    /// One-based selection from `count` entries, returned zero-based.
    ///
    /// Out-of-range or non-numeric input falls back to the first entry with
    /// a warning.
    pub fn select(&mut self, question: &str, count: usize) -> io::Result<usize> {
        let answer = self.prompt(&format!("{} (1-{})", question, count), "1")?;
        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
            _ => {
                self.say("Invalid selection, using first entry")?;
                Ok(0)
            }
        }
    }

    /// Selection that also accepts a manually entered value.
    ///
    /// A numeric answer within range is an index; anything else is returned
    /// verbatim as text.
    pub fn select_or_entry(&mut self, question: &str, count: usize) -> io::Result<Answer> {
        let answer = self.prompt(&format!("{} (1-{}) or enter manually", question, count), "1")?;
        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Ok(Answer::Index(n - 1)),
            _ => Ok(Answer::Text(answer)),
        }
    }
}
