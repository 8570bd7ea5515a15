//! The Counter task: a label and a button that increments it.
//!
//! Simplest of the 7GUIs tasks — a single piece of state mutated by one
//! action, no commands involved.

use crate::key::{self, Binding};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss::{Color, Style};

/// Key bindings for the counter.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Increments the count.
    pub increment: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            increment: Binding::new(vec![KeyCode::Enter, KeyCode::Char('+'), KeyCode::Char('i')])
                .with_help("enter", "increment"),
        }
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.increment]
    }
}

/// The counter widget.
#[derive(Debug, Clone, Default)]
pub struct Model {
    count: i64,
    keymap: KeyMap,
}

/// Create a counter starting at zero.
pub fn new() -> Model {
    Model::default()
}

impl Model {
    /// The current count.
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Adds one, the task's single action.
    pub fn increment(&mut self) {
        self.count += 1;
    }

    /// The widget's key bindings, for footer help.
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Folds a message into the count.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.increment.matches(key_msg) {
                self.increment();
            }
        }
        None
    }

    /// Renders the label and button hint.
    pub fn view(&self) -> String {
        let button = Style::new()
            .foreground(Color::from("212"))
            .bold(true)
            .render("[ Click to increment ]");
        format!("Counter count: {}\n\n{}", self.count, button)
    }
}
