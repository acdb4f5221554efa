use crate::engine::Algorithm;
use crate::ui::actions::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Represents a key binding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    pub fn with_ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Shift is dropped for character keys since the character already
    /// carries it ('+' arrives as Shift+'+' on most layouts)
    pub fn from_event(event: &KeyEvent) -> Self {
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        Self {
            code: event.code,
            modifiers,
        }
    }

    /// Short label for the help overlay
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Right => "Right".to_string(),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key)
        } else {
            key
        }
    }
}

/// Default bindings with the description shown in help
pub fn default_bindings() -> Vec<(KeyBinding, Action, &'static str)> {
    vec![
        (KeyBinding::new(KeyCode::Char(' ')), Action::Step, "Advance one step"),
        (KeyBinding::new(KeyCode::Char('n')), Action::Step, "Advance one step"),
        (KeyBinding::new(KeyCode::Right), Action::Step, "Advance one step"),
        (KeyBinding::new(KeyCode::Char('a')), Action::ToggleAuto, "Start/stop auto-advance"),
        (KeyBinding::new(KeyCode::Char('+')), Action::FasterAuto, "Shorten auto interval"),
        (KeyBinding::new(KeyCode::Char('-')), Action::SlowerAuto, "Lengthen auto interval"),
        (KeyBinding::new(KeyCode::Char('r')), Action::Reset, "Restart the current run"),
        (KeyBinding::new(KeyCode::Char('g')), Action::Generate, "Generate a new sequence"),
        (
            KeyBinding::new(KeyCode::Char('1')),
            Action::SelectAlgorithm(Algorithm::Bubble),
            "Bubble sort",
        ),
        (
            KeyBinding::new(KeyCode::Char('2')),
            Action::SelectAlgorithm(Algorithm::Insertion),
            "Insertion sort",
        ),
        (
            KeyBinding::new(KeyCode::Char('3')),
            Action::SelectAlgorithm(Algorithm::Selection),
            "Selection sort",
        ),
        (KeyBinding::new(KeyCode::Tab), Action::NextAlgorithm, "Next algorithm"),
        (KeyBinding::new(KeyCode::Char('v')), Action::ToggleValues, "Show/hide values"),
        (KeyBinding::new(KeyCode::Char('l')), Action::ToggleLog, "Show/hide log panel"),
        (KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp, "Show/hide help"),
        (KeyBinding::new(KeyCode::F(1)), Action::ToggleHelp, "Show/hide help"),
        (KeyBinding::new(KeyCode::Char('q')), Action::Quit, "Quit"),
        (KeyBinding::with_ctrl(KeyCode::Char('c')), Action::Quit, "Quit"),
    ]
}
