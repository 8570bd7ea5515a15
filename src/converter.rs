//! The Temperature Converter task: bidirectional Celsius/Fahrenheit binding.
//!
//! Two fields, either editable; every edit on one side re-derives the
//! other. Unparseable input flags the edited side invalid and leaves the
//! far side at its last good value instead of propagating garbage.

use crate::field;
use crate::key::{self, Binding};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss::{Color, Style};

/// Celsius to Fahrenheit: `c * 9/5 + 32`.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Fahrenheit to Celsius: `(f - 32) * 5/9`.
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Which temperature scale a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Degrees Celsius.
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

/// Key bindings for the converter.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Moves focus to the other field.
    pub switch_field: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            switch_field: Binding::new(vec![KeyCode::Tab]).with_help("tab", "switch field"),
        }
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.switch_field]
    }
}

/// The temperature converter widget.
#[derive(Debug, Clone)]
pub struct Model {
    celsius: field::Model,
    fahrenheit: field::Model,
    focused: Scale,
    invalid: Option<Scale>,
    keymap: KeyMap,
}

/// Create a converter primed with 0 °C / 32 °F, Celsius side focused.
pub fn new() -> Model {
    let mut celsius = field::new().with_width(10).with_value(format_temp(0.0));
    let fahrenheit = field::new()
        .with_width(10)
        .with_value(format_temp(celsius_to_fahrenheit(0.0)));
    celsius.focus();
    Model {
        celsius,
        fahrenheit,
        focused: Scale::Celsius,
        invalid: None,
        keymap: KeyMap::default(),
    }
}

fn format_temp(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

impl Model {
    /// The side currently receiving keystrokes.
    pub fn focused(&self) -> Scale {
        self.focused
    }

    /// The side whose text currently fails to parse, if any.
    pub fn invalid(&self) -> Option<Scale> {
        self.invalid
    }

    /// Raw text of the Celsius field.
    pub fn celsius_text(&self) -> &str {
        self.celsius.value()
    }

    /// Raw text of the Fahrenheit field.
    pub fn fahrenheit_text(&self) -> &str {
        self.fahrenheit.value()
    }

    /// The widget's key bindings, for footer help.
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    fn switch_focus(&mut self) {
        match self.focused {
            Scale::Celsius => {
                self.celsius.blur();
                self.fahrenheit.focus();
                self.focused = Scale::Fahrenheit;
            }
            Scale::Fahrenheit => {
                self.fahrenheit.blur();
                self.celsius.focus();
                self.focused = Scale::Celsius;
            }
        }
    }

    /// Re-derives the unfocused side from the focused side's text.
    fn sync(&mut self) {
        let (edited, derived, convert): (&field::Model, _, fn(f64) -> f64) = match self.focused {
            Scale::Celsius => (&self.celsius, Scale::Fahrenheit, celsius_to_fahrenheit),
            Scale::Fahrenheit => (&self.fahrenheit, Scale::Celsius, fahrenheit_to_celsius),
        };
        match edited.value().trim().parse::<f64>() {
            Ok(v) => {
                let text = format_temp(convert(v));
                match derived {
                    Scale::Celsius => self.celsius.set_value(text),
                    Scale::Fahrenheit => self.fahrenheit.set_value(text),
                }
                self.invalid = None;
            }
            Err(_) => {
                self.invalid = Some(self.focused);
            }
        }
    }

    /// Routes focus switches and edits, re-deriving the far side.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.switch_field.matches(key_msg) {
                self.switch_focus();
                return None;
            }
            let changed = match self.focused {
                Scale::Celsius => self.celsius.update(key_msg),
                Scale::Fahrenheit => self.fahrenheit.update(key_msg),
            };
            if changed {
                self.sync();
            }
        }
        None
    }

    /// Renders both labeled fields; an invalid side is marked red.
    pub fn view(&self) -> String {
        let error_style = Style::new().foreground(Color::from("196"));
        let label = |scale: Scale, text: &str| -> String {
            if self.invalid == Some(scale) {
                error_style.clone().render(text)
            } else {
                text.to_string()
            }
        };
        format!(
            "{} {}\n{} {}",
            self.celsius.view(),
            label(Scale::Celsius, "Celsius"),
            self.fahrenheit.view(),
            label(Scale::Fahrenheit, "Fahrenheit"),
        )
    }
}
