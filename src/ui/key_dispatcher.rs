use crate::config::key_bindings::{default_bindings, KeyBinding};
use crate::ui::actions::Action;
use crossterm::event::KeyEvent;
use std::collections::HashMap;
use tracing::trace;

/// Simple key dispatcher that maps keys to actions
pub struct KeyDispatcher {
    map: HashMap<KeyBinding, Action>,
    help: Vec<(String, &'static str)>,
}

impl KeyDispatcher {
    pub fn new() -> Self {
        let mut map = HashMap::new();
        let mut help: Vec<(String, &'static str)> = Vec::new();

        for (binding, action, description) in default_bindings() {
            // Several keys share a description; list them on one help line
            match help.iter_mut().find(|(_, d)| *d == description) {
                Some((keys, _)) => {
                    keys.push_str(", ");
                    keys.push_str(&binding.label());
                }
                None => help.push((binding.label(), description)),
            }
            map.insert(binding, action);
        }

        Self { map, help }
    }

    pub fn dispatch(&self, event: &KeyEvent) -> Option<Action> {
        let action = self.map.get(&KeyBinding::from_event(event)).copied();
        trace!(target: "input", "Key {:?} -> {:?}", event.code, action);
        action
    }

    /// `(keys, description)` pairs for the help overlay
    pub fn help_entries(&self) -> &[(String, &'static str)] {
        &self.help
    }
}

impl Default for KeyDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
