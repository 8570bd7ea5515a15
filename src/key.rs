//! Type-safe key bindings with attached help text.
//!
//! A [`Binding`] couples one or more key combinations with the short help
//! label shown in a widget's footer. Widgets group their bindings in a
//! keymap struct and expose the interesting ones through [`KeyMap`].

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single action bound to one or more key combinations.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<(KeyCode, KeyModifiers)>,
    /// Short label for the key itself, e.g. `"r"` or `"ctrl+c"`.
    pub help: String,
    /// What the key does, e.g. `"reset"`.
    pub description: String,
}

impl Binding {
    /// Creates a binding for plain (unmodified) keys.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys: keys
                .into_iter()
                .map(|k| (k, KeyModifiers::NONE))
                .collect(),
            help: String::new(),
            description: String::new(),
        }
    }

    /// Creates a binding for keys with explicit modifiers, e.g.
    /// `(KeyCode::Char('c'), KeyModifiers::CONTROL)`.
    pub fn new_with_modifiers(keys: Vec<(KeyCode, KeyModifiers)>) -> Self {
        Self {
            keys,
            help: String::new(),
            description: String::new(),
        }
    }

    /// Attaches the help label and description shown in footers.
    pub fn with_help(mut self, help: impl Into<String>, description: impl Into<String>) -> Self {
        self.help = help.into();
        self.description = description.into();
        self
    }

    /// Returns true if the incoming key event triggers this binding.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.keys
            .iter()
            .any(|(code, mods)| *code == key_msg.key && *mods == key_msg.modifiers)
    }
}

/// Implemented by widget keymaps so a host can render a footer help line.
pub trait KeyMap {
    /// The bindings worth advertising, in display order.
    fn short_help(&self) -> Vec<&Binding>;
}

/// Formats bindings as a single help line: `r reset • q quit`.
pub fn help_line(bindings: &[&Binding]) -> String {
    bindings
        .iter()
        .filter(|b| !b.help.is_empty())
        .map(|b| format!("{} {}", b.help, b.description))
        .collect::<Vec<_>>()
        .join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_matches_plain_key() {
        let binding = Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset");
        assert!(binding.matches(&key(KeyCode::Char('r'))));
        assert!(!binding.matches(&key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_matches_any_of_several_keys() {
        let binding = Binding::new(vec![KeyCode::Char('q'), KeyCode::Esc]);
        assert!(binding.matches(&key(KeyCode::Char('q'))));
        assert!(binding.matches(&key(KeyCode::Esc)));
        assert!(!binding.matches(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_modifiers_must_match() {
        let binding = Binding::new_with_modifiers(vec![(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )])
        .with_help("ctrl+c", "quit");

        assert!(binding.matches(&KeyMsg {
            key: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        }));
        // Plain 'c' must not trigger the ctrl+c binding.
        assert!(!binding.matches(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn test_help_line_skips_unlabeled_bindings() {
        let reset = Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset");
        let hidden = Binding::new(vec![KeyCode::Char('x')]);
        let quit = Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit");

        assert_eq!(help_line(&[&reset, &hidden, &quit]), "r reset • q quit");
    }
}
