//! Operator I/O seam.
//!
//! The cycle talks to the operator only through [`Terminal`], so it can run
//! against stdin/stdout or against a script of canned answers.

#[cfg(any(test, feature = "test_utils"))]
use std::collections::VecDeque;
use std::fmt;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            Level::Info => "",
            Level::Success => "OK: ",
            Level::Warning => "WARNING: ",
            Level::Error => "ERROR: ",
        };
        write!(f, "{}{}", tag, self.text)
    }
}

pub trait Terminal {
    /// Shows `question` and returns the operator's answer without the line ending.
    ///
    /// End of input must be reported as [`io::ErrorKind::UnexpectedEof`].
    fn prompt(&mut self, question: &str) -> io::Result<String>;

    fn report(&mut self, notice: Notice);
}

/// Terminal that replays canned answers and records everything shown.
///
/// Runs out of answers like a closed stdin: with `UnexpectedEof`.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
    pub notices: Vec<Notice>,
}

#[cfg(any(test, feature = "test_utils"))]
impl ScriptedTerminal {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// True if any recorded notice at `level` contains `needle`.
    pub fn saw(&self, level: Level, needle: &str) -> bool {
        self.notices
            .iter()
            .any(|n| n.level == level && n.text.contains(needle))
    }
}

#[cfg(any(test, feature = "test_utils"))]
impl Terminal for ScriptedTerminal {
    fn prompt(&mut self, question: &str) -> io::Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted answers"))
    }

    fn report(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
