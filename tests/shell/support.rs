//! Test doubles shared by the shell integration tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::rc::Rc;

use calcspace_analysis::{Analyzer, Target, TargetLoader};
use calcspace_foundation::{Error, Flags, Result};
use calcspace_shell::{LineEditor, ReadResult, Shell};

/// Editor that replays a fixed script and remembers every prompt.
pub struct ScriptedEditor {
    script: VecDeque<ReadResult>,
    pub prompts: Vec<String>,
    pub recalled: Vec<String>,
}

impl ScriptedEditor {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            script: lines
                .iter()
                .map(|line| ReadResult::Line((*line).to_string()))
                .collect(),
            prompts: Vec::new(),
            recalled: Vec::new(),
        }
    }

    /// Inserts a Ctrl+C at `index` in the script.
    pub fn interrupt_at(mut self, index: usize) -> Self {
        self.script.insert(index, ReadResult::Interrupted);
        self
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        self.prompts.push(prompt.to_string());
        Ok(self.script.pop_front().unwrap_or(ReadResult::Eof))
    }

    fn add_history(&mut self, line: &str) {
        self.recalled.push(line.to_string());
    }
}

/// Analyzer that records the flags of every call.
#[derive(Clone, Default)]
pub struct RecordingAnalyzer {
    pub calls: Rc<RefCell<Vec<Flags>>>,
}

impl Analyzer for RecordingAnalyzer {
    fn analyze(&mut self, target: &Target, flags: &Flags) -> Result<String> {
        self.calls.borrow_mut().push(*flags);
        Ok(format!("analyzed {}", target.name()))
    }
}

/// Loader serving a fixed set of in-memory files.
#[derive(Default)]
pub struct MapLoader {
    files: HashMap<String, Vec<u8>>,
}

impl MapLoader {
    pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files.insert(path.to_string(), bytes.to_vec());
        self
    }
}

impl TargetLoader for MapLoader {
    fn load(&self, path: &Path) -> Result<Target> {
        let key = path.display().to_string();
        match self.files.get(&key) {
            Some(bytes) => Ok(Target::new(path, bytes.clone())),
            None => Err(Error::target_load(key, "No such file or directory")),
        }
    }
}

/// Mach-O 64 magic followed by padding.
pub const MACHO: &[u8] = &[0xcf, 0xfa, 0xed, 0xfe, 0, 0, 0, 0];

/// Builds a shell over `editor` that knows `foo.bin` and `dir/bar.bin`.
pub fn shell_with(editor: ScriptedEditor) -> (Shell<ScriptedEditor>, RecordingAnalyzer) {
    let analyzer = RecordingAnalyzer::default();
    let loader = MapLoader::default()
        .with_file("foo.bin", MACHO)
        .with_file("dir/bar.bin", MACHO);
    let shell = Shell::with_editor(editor)
        .without_banner()
        .with_loader(loader)
        .with_analyzer(analyzer.clone());
    (shell, analyzer)
}

/// Builds a shell with no scripted input.
pub fn shell() -> (Shell<ScriptedEditor>, RecordingAnalyzer) {
    shell_with(ScriptedEditor::new(&[]))
}
