//! Command-name completion.

use crate::registry::Registry;

/// Completes command names at the start of a line.
#[derive(Debug, Clone)]
pub struct CommandCompleter {
    names: Vec<&'static str>,
}

impl CommandCompleter {
    /// Creates a completer over the names in `registry`, in registry order.
    #[must_use]
    pub fn new(registry: &Registry) -> Self {
        Self {
            names: registry.names(),
        }
    }

    /// Returns the candidates for `text`, the word beginning at column `start`.
    ///
    /// Only the first word of a line is completed; any other position yields
    /// no candidates.
    #[must_use]
    pub fn complete<'a>(&'a self, text: &'a str, start: usize) -> Completions<'a> {
        let names: &[&'static str] = if start == 0 { &self.names } else { &[] };
        Completions {
            names,
            prefix: text,
            index: 0,
        }
    }
}

/// Cursor over the candidates of one completion request.
#[derive(Debug, Clone)]
pub struct Completions<'a> {
    names: &'a [&'static str],
    prefix: &'a str,
    index: usize,
}

impl Iterator for Completions<'_> {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&name) = self.names.get(self.index) {
            self.index += 1;
            if name.starts_with(self.prefix) {
                return Some(name);
            }
        }
        None
    }
}
