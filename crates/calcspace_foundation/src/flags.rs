//! Analysis flags carried by a shell session.
//!
//! Flags come in two lifecycles. [`Setting`]s persist until toggled again.
//! An [`Action`] is a one-shot request that is set immediately before an
//! analysis pass and cleared right after it, so at most one can be pending.

use std::fmt;

/// A one-shot analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Free space available for new load commands.
    NewCmdsSpace,
    /// Free space in the `__TEXT` segment.
    FreeTextSpace,
    /// NOP space inside functions.
    NopSpace,
    /// Total NOP space across the binary.
    TotalNopSpace,
}

impl Action {
    /// All actions, in command order.
    pub const ALL: [Self; 4] = [
        Self::NewCmdsSpace,
        Self::FreeTextSpace,
        Self::NopSpace,
        Self::TotalNopSpace,
    ];

    /// Short human-readable description of the pass.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::NewCmdsSpace => "free space for new commands",
            Self::FreeTextSpace => "free __TEXT space",
            Self::NopSpace => "NOP space",
            Self::TotalNopSpace => "total NOP space",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A persistent configuration toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Emit tab-separated output suitable for spreadsheets.
    ExcelOutput,
    /// Compute free space for all sections, not just `__text`.
    AllSections,
    /// Treat the target as an iOS application.
    IosTarget,
}

impl Setting {
    /// All settings, in command order.
    pub const ALL: [Self; 3] = [Self::ExcelOutput, Self::AllSections, Self::IosTarget];

    /// Label used when printing the setting.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExcelOutput => "excel output",
            Self::AllSections => "all sections",
            Self::IosTarget => "ios target",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The full flag set handed to an analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    excel_output: bool,
    all_sections: bool,
    ios_target: bool,
    action: Option<Action>,
}

impl Flags {
    /// Creates a flag set with everything disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            excel_output: false,
            all_sections: false,
            ios_target: false,
            action: None,
        }
    }

    /// Returns the value of a setting.
    #[must_use]
    pub const fn get(&self, setting: Setting) -> bool {
        match setting {
            Setting::ExcelOutput => self.excel_output,
            Setting::AllSections => self.all_sections,
            Setting::IosTarget => self.ios_target,
        }
    }

    /// Sets a setting to an explicit value.
    pub fn set(&mut self, setting: Setting, value: bool) {
        *self.slot(setting) = value;
    }

    /// Flips a setting and returns its new value.
    pub fn toggle(&mut self, setting: Setting) -> bool {
        let slot = self.slot(setting);
        *slot = !*slot;
        *slot
    }

    /// Returns true if excel output is enabled.
    #[must_use]
    pub const fn excel_output(&self) -> bool {
        self.excel_output
    }

    /// Returns true if all sections should be analyzed.
    #[must_use]
    pub const fn all_sections(&self) -> bool {
        self.all_sections
    }

    /// Returns true if the target is an iOS application.
    #[must_use]
    pub const fn ios_target(&self) -> bool {
        self.ios_target
    }

    /// Returns the pending action, if any.
    #[must_use]
    pub const fn action(&self) -> Option<Action> {
        self.action
    }

    /// Returns true if `action` is the pending action.
    #[must_use]
    pub fn is_requested(&self, action: Action) -> bool {
        self.action == Some(action)
    }

    /// Requests an action, replacing any pending one.
    pub fn request(&mut self, action: Action) {
        self.action = Some(action);
    }

    /// Clears all action flags. Settings are left untouched.
    pub fn reset_actions(&mut self) {
        self.action = None;
    }

    fn slot(&mut self, setting: Setting) -> &mut bool {
        match setting {
            Setting::ExcelOutput => &mut self.excel_output,
            Setting::AllSections => &mut self.all_sections,
            Setting::IosTarget => &mut self.ios_target,
        }
    }
}
