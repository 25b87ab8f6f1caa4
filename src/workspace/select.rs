//! Single-choice selection lists.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// A modal single-choice list.
///
/// Returns the chosen label, or `None` when the user closes the list
/// without choosing. Callers treat `None` as "do nothing".
pub trait SelectionList {
    fn select(&mut self, title: &str, labels: &[String]) -> Option<String>;
}

/// Selection list answering from a queue of prepared choices.
///
/// A `None` answer (or running out of answers) cancels.
#[derive(Debug, Default)]
pub struct ScriptedSelection {
    answers: VecDeque<Option<String>>,
    titles: Vec<String>,
}

impl ScriptedSelection {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self { answers: answers.into_iter().map(|a| a.map(Into::into)).collect(), titles: Vec::new() }
    }

    /// Titles of every list shown so far.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

impl SelectionList for ScriptedSelection {
    fn select(&mut self, title: &str, labels: &[String]) -> Option<String> {
        self.titles.push(title.to_string());
        let answer = self.answers.pop_front().flatten()?;
        labels.contains(&answer).then_some(answer)
    }
}

/// Numbered list on a writer, answered by index or label on a reader.
///
/// An empty line or anything unrecognised cancels.
#[derive(Debug)]
pub struct StdinSelection<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdinSelection<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> SelectionList for StdinSelection<R, W> {
    fn select(&mut self, title: &str, labels: &[String]) -> Option<String> {
        if labels.is_empty() {
            return None;
        }
        writeln!(self.output, "{}:", title).ok()?;
        for (i, label) in labels.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, label).ok()?;
        }
        write!(self.output, "choose> ").ok()?;
        self.output.flush().ok()?;

        let mut line = String::new();
        self.input.read_line(&mut line).ok()?;
        let answer = line.trim();
        if let Ok(index) = answer.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| labels.get(i)).cloned();
        }
        labels.iter().find(|l| l.as_str() == answer).cloned()
    }
}
