//! Bounded line history with bang expansion.
//!
//! Events are numbered from 1 in the order they were accepted. When the
//! history is full the oldest event is dropped and the base number advances,
//! so surviving events keep their numbers.
//!
//! Supported expansions:
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `!!` | previous event |
//! | `!n` / `!-n` | event `n` / `n`-th previous event |
//! | `!str` | most recent event starting with `str` |
//! | `!?str?` | most recent event containing `str` |
//! | `!#` | the line typed so far |
//! | `:0` `:n` `:^` `:$` `:*` `:x-y` | word designators (`^`, `$`, `*` may drop the colon) |
//! | `:p` | print the result instead of executing it |
//! | `:s/old/new/` | replace the first `old` with `new` |
//! | `^old^new^` | quick substitution on the previous event |
//!
//! A designator directly after `!` (`!$`, `!^`, `!*`, `!:n`) applies to the
//! previous event.
//!
//! A `!` before whitespace, `=`, `(` or the end of the line is literal, `\!`
//! is a literal `!`, and nothing is expanded inside single quotes. A quote
//! only opens at the start of a word, so apostrophes inside words are text.

use std::collections::VecDeque;

use calcspace_foundation::{Error, Result};
use tracing::debug;

/// Number of lines kept in the history.
pub const HISTORY_CAPACITY: usize = 7;

/// The result of expanding a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Nothing to expand; execute the line as typed.
    Unchanged(String),
    /// Execute and record the expanded line.
    Expanded(String),
    /// Show the expanded line without executing or recording it.
    PrintOnly(String),
}

impl Expansion {
    /// The resulting text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Unchanged(s) | Self::Expanded(s) | Self::PrintOnly(s) => s,
        }
    }

    /// Consumes the expansion, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Unchanged(s) | Self::Expanded(s) | Self::PrintOnly(s) => s,
        }
    }
}

/// Ring of previously accepted lines.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
    /// Event number of the oldest entry.
    base: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Creates an empty history holding [`HISTORY_CAPACITY`] lines.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Creates an empty history holding at most `capacity` lines (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            base: 1,
        }
    }

    /// Appends a line, evicting the oldest one if the history is full.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_back(line.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.base += 1;
        }
    }

    /// Number of stored lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the line with the given event number.
    #[must_use]
    pub fn get(&self, number: usize) -> Option<&str> {
        let index = number.checked_sub(self.base)?;
        self.entries.get(index).map(String::as_str)
    }

    /// Returns the most recent line.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Iterates over stored lines, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Expands history references in `line`.
    ///
    /// # Errors
    ///
    /// Returns a `HistoryExpansion` error when an event cannot be found, a
    /// word designator is out of range, or a substitution does not apply.
    pub fn expand(&self, line: &str) -> Result<Expansion> {
        let expansion = Expander::new(self, line).run()?;
        if !matches!(expansion, Expansion::Unchanged(_)) {
            debug!(line, expanded = expansion.text(), "history expansion");
        }
        Ok(expansion)
    }

    fn previous(&self, back: usize) -> Option<&str> {
        let index = self.entries.len().checked_sub(back)?;
        self.entries.get(index).map(String::as_str)
    }

    fn search(&self, pattern: &str, anywhere: bool) -> Option<&str> {
        self.iter().rev().find(|entry| {
            if anywhere {
                entry.contains(pattern)
            } else {
                entry.starts_with(pattern)
            }
        })
    }
}

/// Single-use cursor over one input line.
struct Expander<'h> {
    history: &'h History,
    chars: Vec<char>,
    pos: usize,
    out: String,
    changed: bool,
    print_only: bool,
}

impl<'h> Expander<'h> {
    fn new(history: &'h History, line: &str) -> Self {
        Self {
            history,
            chars: line.chars().collect(),
            pos: 0,
            out: String::with_capacity(line.len()),
            changed: false,
            print_only: false,
        }
    }

    fn run(mut self) -> Result<Expansion> {
        if self.peek() == Some('^') {
            self.quick_substitution()?;
        }

        let mut in_quote = false;
        while let Some(c) = self.peek() {
            match c {
                '\'' if in_quote || self.at_word_start() => {
                    in_quote = !in_quote;
                    self.out.push(c);
                    self.pos += 1;
                }
                '\\' if !in_quote && self.peek_at(1) == Some('!') => {
                    self.out.push('!');
                    self.pos += 2;
                    self.changed = true;
                }
                '!' if !in_quote && !self.is_literal_bang() => {
                    let text = self.event()?;
                    self.out.push_str(&text);
                    self.changed = true;
                }
                _ => {
                    self.out.push(c);
                    self.pos += 1;
                }
            }
        }

        Ok(if self.print_only {
            Expansion::PrintOnly(self.out)
        } else if self.changed {
            Expansion::Expanded(self.out)
        } else {
            Expansion::Unchanged(self.out)
        })
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// An apostrophe inside a word does not open a quote.
    fn at_word_start(&self) -> bool {
        self.pos == 0 || self.chars[self.pos - 1].is_whitespace()
    }

    fn is_literal_bang(&self) -> bool {
        match self.peek_at(1) {
            None => true,
            Some(c) => c.is_whitespace() || c == '=' || c == '(',
        }
    }

    fn token(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    /// Reads up to (not including) `delim`, consuming the delimiter if present.
    fn read_until(&mut self, delim: char) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == delim {
                return s;
            }
            s.push(c);
        }
        s
    }

    fn read_digits(&mut self) -> Option<usize> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        self.token(start).parse().ok()
    }

    fn not_found(&self, start: usize) -> Error {
        Error::history_expansion(format!("{}: event not found", self.token(start)))
    }

    /// `^old^new^` at the start of the line.
    fn quick_substitution(&mut self) -> Result<()> {
        let start = self.pos;
        self.pos += 1;
        let old = self.read_until('^');
        let new = self.read_until('^');

        let Some(last) = self.history.last() else {
            return Err(self.not_found(start));
        };
        let replaced = substitute(last, &old, &new)?;
        self.out.push_str(&replaced);
        self.changed = true;
        Ok(())
    }

    /// Expands one `!` reference starting at the current position.
    fn event(&mut self) -> Result<String> {
        let start = self.pos;
        self.pos += 1;

        let mut bare_designators = true;
        let event = match self.peek() {
            Some('!') => {
                self.pos += 1;
                self.history.last().map(str::to_string)
            }
            Some('#') => {
                self.pos += 1;
                Some(self.out.clone())
            }
            Some('-') if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.pos += 1;
                self.read_digits()
                    .filter(|&n| n > 0)
                    .and_then(|n| self.history.previous(n))
                    .map(str::to_string)
            }
            Some(c) if c.is_ascii_digit() => self
                .read_digits()
                .and_then(|n| self.history.get(n))
                .map(str::to_string),
            Some('?') => {
                self.pos += 1;
                let pattern = self.read_until('?');
                self.history.search(&pattern, true).map(str::to_string)
            }
            // `!$`, `!^`, `!*` and `!:n` select words of the previous event
            Some('$' | '^' | '*' | ':') => {
                let last = self.history.last().map(str::to_string);
                if last.is_none() {
                    self.pos += 1;
                }
                last
            }
            _ => {
                bare_designators = false;
                let from = self.pos;
                while self.peek().is_some_and(|c| !c.is_whitespace() && c != ':') {
                    self.pos += 1;
                }
                let prefix = self.token(from);
                self.history.search(&prefix, false).map(str::to_string)
            }
        };

        let Some(event) = event else {
            return Err(self.not_found(start));
        };

        let mut text = self.designator(&event, start, bare_designators)?;
        self.modifiers(&mut text, start)?;
        Ok(text)
    }

    fn designator(&mut self, event: &str, start: usize, bare: bool) -> Result<String> {
        let (has_colon, next) = match self.peek() {
            Some(':') => (true, self.peek_at(1)),
            c => (false, c),
        };
        let is_designator = next.is_some_and(|c| c.is_ascii_digit() || "^$*-".contains(c));
        let allowed = if has_colon {
            is_designator
        } else {
            bare && next.is_some_and(|c| "^$*".contains(c))
        };
        if !allowed {
            return Ok(event.to_string());
        }
        if has_colon {
            self.pos += 1;
        }

        let words: Vec<&str> = event.split_whitespace().collect();
        let last = words.len().saturating_sub(1);

        let (from, to) = match self.peek() {
            Some('^') => {
                self.pos += 1;
                (1, Some(1))
            }
            Some('$') => {
                self.pos += 1;
                (last, Some(last))
            }
            Some('*') => {
                self.pos += 1;
                if words.len() < 2 {
                    return Ok(String::new());
                }
                (1, Some(last))
            }
            _ => {
                let from = self.read_digits().unwrap_or(0);
                let to = if self.peek() == Some('-') {
                    self.pos += 1;
                    if self.peek() == Some('$') {
                        self.pos += 1;
                        Some(last)
                    } else {
                        // `x-` stops before the last word
                        self.read_digits().or_else(|| last.checked_sub(1))
                    }
                } else {
                    Some(from)
                };
                (from, to)
            }
        };

        match to {
            Some(to) if from <= to && to < words.len() => Ok(words[from..=to].join(" ")),
            _ => Err(Error::history_expansion(format!(
                "{}: bad word specifier",
                self.token(start)
            ))),
        }
    }

    fn modifiers(&mut self, text: &mut String, start: usize) -> Result<()> {
        while self.peek() == Some(':') {
            match self.peek_at(1) {
                Some('p') => {
                    self.pos += 2;
                    self.print_only = true;
                }
                Some('s') => {
                    self.pos += 2;
                    let Some(delim) = self.peek() else {
                        return Err(Error::history_expansion(format!(
                            "{}: substitution failed",
                            self.token(start)
                        )));
                    };
                    self.pos += 1;
                    let old = self.read_until(delim);
                    let new = self.read_until(delim);
                    *text = substitute(text, &old, &new)?;
                }
                _ => {
                    self.pos = (self.pos + 2).min(self.chars.len());
                    return Err(Error::history_expansion(format!(
                        "{}: unrecognized history modifier",
                        self.token(start)
                    )));
                }
            }
        }
        Ok(())
    }
}

fn substitute(text: &str, old: &str, new: &str) -> Result<String> {
    if old.is_empty() || !text.contains(old) {
        return Err(Error::history_expansion(format!(
            "{old}: substitution failed"
        )));
    }
    Ok(text.replacen(old, new, 1))
}
