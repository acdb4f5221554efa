// Actions the terminal UI can perform, decoupled from the keys that trigger them

use crate::engine::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Stepping
    Step,
    ToggleAuto,
    FasterAuto,
    SlowerAuto,

    // Run lifecycle
    Reset,
    Generate,
    SelectAlgorithm(Algorithm),
    NextAlgorithm,

    // Panels
    ToggleValues,
    ToggleLog,
    ToggleHelp,

    Quit,
}

impl Action {
    /// Actions that are still allowed while the help overlay is open
    pub fn allowed_in_help(&self) -> bool {
        matches!(self, Action::ToggleHelp | Action::Quit)
    }
}
