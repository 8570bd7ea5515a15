//! Minimal focusable single-line input field.
//!
//! The converter and flight-booker widgets each need a couple of small
//! labeled text fields. This is a stripped-down line editor: a value, a
//! cursor position, and a focus flag. The cursor is drawn reverse-video
//! when the field has focus.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss::Style;

/// A single-line input field.
#[derive(Debug, Clone)]
pub struct Model {
    value: String,
    cursor_position: usize,
    placeholder: String,
    width: usize,
    focus: bool,
    enabled: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            value: String::new(),
            cursor_position: 0,
            placeholder: String::new(),
            width: 14,
            focus: false,
            enabled: true,
        }
    }
}

/// Create a new field. Equivalent to `Model::new()`.
pub fn new() -> Model {
    Model::new()
}

impl Model {
    /// Creates an empty, enabled, unfocused field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed the field with a value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Builder: text shown while empty and unfocused.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Builder: rendered width in characters.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor_position = self.value.chars().count();
    }

    /// The current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Gives the field keyboard focus (no-op while disabled).
    pub fn focus(&mut self) {
        if self.enabled {
            self.focus = true;
        }
    }

    /// Removes keyboard focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Whether the field currently receives keystrokes.
    pub fn is_focused(&self) -> bool {
        self.focus
    }

    /// A disabled field ignores input and renders faint. Disabling also
    /// drops focus so keystrokes cannot land in it.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.focus = false;
        }
    }

    /// Whether the field accepts input at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Applies an editing key to the field. Returns true if the value
    /// changed, so callers can re-derive dependent state on every edit.
    pub fn update(&mut self, key_msg: &KeyMsg) -> bool {
        if !self.focus || !self.enabled {
            return false;
        }
        match key_msg.key {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => self.delete_char_backward(),
            KeyCode::Delete => self.delete_char_forward(),
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                if self.cursor_position < self.value.chars().count() {
                    self.cursor_position += 1;
                }
                false
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                false
            }
            KeyCode::End => {
                self.cursor_position = self.value.chars().count();
                false
            }
            _ => false,
        }
    }

    fn insert_char(&mut self, ch: char) {
        let byte_pos = self.byte_offset(self.cursor_position);
        self.value.insert(byte_pos, ch);
        self.cursor_position += 1;
    }

    fn delete_char_backward(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }
        let byte_pos = self.byte_offset(self.cursor_position - 1);
        self.value.remove(byte_pos);
        self.cursor_position -= 1;
        true
    }

    fn delete_char_forward(&mut self) -> bool {
        if self.cursor_position >= self.value.chars().count() {
            return false;
        }
        let byte_pos = self.byte_offset(self.cursor_position);
        self.value.remove(byte_pos);
        true
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Renders the field, cursor and padding included.
    pub fn view(&self) -> String {
        let display: String = if self.value.is_empty() && !self.focus {
            self.placeholder.clone()
        } else {
            self.value.clone()
        };

        // Pad to width so labels line up; the cursor block below adds
        // escape codes, so pad on the raw char count.
        let mut visible = display.chars().count();
        if self.focus && self.cursor_position >= visible {
            visible += 1; // trailing cursor block
        }

        let mut output = if self.focus {
            // Reverse-video block over the char under the cursor, or a
            // trailing block when the cursor sits past the end.
            let chars: Vec<char> = display.chars().collect();
            let before: String = chars[..self.cursor_position.min(chars.len())].iter().collect();
            let under: String = chars
                .get(self.cursor_position)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after: String = if self.cursor_position < chars.len() {
                chars[self.cursor_position + 1..].iter().collect()
            } else {
                String::new()
            };
            format!(
                "{}{}{}",
                before,
                Style::new().reverse(true).inline(true).render(&under),
                after
            )
        } else {
            display
        };

        if visible < self.width {
            output.push_str(&" ".repeat(self.width - visible));
        }

        if self.enabled {
            output
        } else {
            Style::new().faint(true).render(&output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let mut field = new();
        field.focus();
        for c in ['4', '2'] {
            field.update(&key(KeyCode::Char(c)));
        }
        assert_eq!(field.value(), "42");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut field = new().with_value("13");
        field.focus();
        field.update(&key(KeyCode::Left));
        field.update(&key(KeyCode::Char('2')));
        assert_eq!(field.value(), "123");
    }

    #[test]
    fn test_backspace_removes_before_cursor() {
        let mut field = new().with_value("3.14");
        field.focus();
        assert!(field.update(&key(KeyCode::Backspace)));
        assert_eq!(field.value(), "3.1");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut field = new().with_value("7");
        field.focus();
        field.update(&key(KeyCode::Home));
        assert!(!field.update(&key(KeyCode::Backspace)));
        assert_eq!(field.value(), "7");
    }

    #[test]
    fn test_unfocused_field_ignores_input() {
        let mut field = new().with_value("30");
        assert!(!field.update(&key(KeyCode::Char('9'))));
        assert_eq!(field.value(), "30");
    }

    #[test]
    fn test_disabled_field_ignores_input_and_drops_focus() {
        let mut field = new().with_value("01.01.2025");
        field.focus();
        field.set_enabled(false);
        assert!(!field.is_focused());
        assert!(!field.update(&key(KeyCode::Char('x'))));
        assert_eq!(field.value(), "01.01.2025");
    }

    #[test]
    fn test_update_reports_value_changes_only() {
        let mut field = new().with_value("5");
        field.focus();
        assert!(!field.update(&key(KeyCode::Left)));
        assert!(field.update(&key(KeyCode::Char('2'))));
    }

    #[test]
    fn test_view_shows_placeholder_when_empty_and_blurred() {
        let field = new().with_placeholder("DD.MM.YYYY").with_width(10);
        assert!(field.view().starts_with("DD.MM.YYYY"));
    }
}
