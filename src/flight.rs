//! The Flight Booker task.
//!
//! A flight-type selector, two date fields in `DD.MM.YYYY` format, and a
//! book action. The return-date field is only editable for return flights,
//! and booking is refused while either relevant date fails to parse or the
//! return date precedes departure.

use crate::field;
use crate::key::{self, Binding};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use chrono::NaiveDate;
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss::{Color, Style};

/// Display/input format for both date fields.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

const DEFAULT_DEPARTURE: &str = "01.01.2025";

/// Parses a `DD.MM.YYYY` date, `None` for anything malformed.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// The kind of trip being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightType {
    /// Departure leg only.
    OneWay,
    /// Departure and return legs.
    Return,
}

impl FlightType {
    /// Human-readable name used in views and confirmations.
    pub fn label(&self) -> &'static str {
        match self {
            FlightType::OneWay => "one-way flight",
            FlightType::Return => "return flight",
        }
    }

    fn toggled(&self) -> Self {
        match self {
            FlightType::OneWay => FlightType::Return,
            FlightType::Return => FlightType::OneWay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Departure,
    Return,
}

/// Key bindings for the flight booker.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Cycles between one-way and return.
    pub toggle_type: Binding,
    /// Moves focus between the date fields.
    pub switch_field: Binding,
    /// Books the flight when the form is valid.
    pub book: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            toggle_type: Binding::new(vec![KeyCode::Char('t')]).with_help("t", "flight type"),
            switch_field: Binding::new(vec![KeyCode::Tab]).with_help("tab", "switch field"),
            book: Binding::new(vec![KeyCode::Enter]).with_help("enter", "book"),
        }
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.toggle_type, &self.switch_field, &self.book]
    }
}

/// The flight booker widget.
#[derive(Debug, Clone)]
pub struct Model {
    flight_type: FlightType,
    departure: field::Model,
    return_date: field::Model,
    focused: Focus,
    booked: Option<String>,
    keymap: KeyMap,
}

/// Create a booker for a one-way flight with a valid default departure.
pub fn new() -> Model {
    let mut departure = field::new()
        .with_width(12)
        .with_value(DEFAULT_DEPARTURE)
        .with_placeholder("DD.MM.YYYY");
    let mut return_date = field::new()
        .with_width(12)
        .with_value(DEFAULT_DEPARTURE)
        .with_placeholder("DD.MM.YYYY");
    departure.focus();
    return_date.set_enabled(false);
    Model {
        flight_type: FlightType::OneWay,
        departure,
        return_date,
        focused: Focus::Departure,
        booked: None,
        keymap: KeyMap::default(),
    }
}

impl Model {
    /// The currently selected trip kind.
    pub fn flight_type(&self) -> FlightType {
        self.flight_type
    }

    /// Raw text of the departure field.
    pub fn departure_text(&self) -> &str {
        self.departure.value()
    }

    /// Raw text of the return field.
    pub fn return_text(&self) -> &str {
        self.return_date.value()
    }

    /// The confirmation line of the last successful booking.
    pub fn booked(&self) -> Option<&str> {
        self.booked.as_deref()
    }

    /// The widget's key bindings, for footer help.
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Booking is allowed only with parseable dates, and for return
    /// flights only when the return leg does not precede departure.
    pub fn can_book(&self) -> bool {
        let Some(departure) = parse_date(self.departure.value()) else {
            return false;
        };
        match self.flight_type {
            FlightType::OneWay => true,
            FlightType::Return => {
                parse_date(self.return_date.value()).is_some_and(|ret| ret >= departure)
            }
        }
    }

    fn toggle_type(&mut self) {
        self.flight_type = self.flight_type.toggled();
        self.booked = None;
        match self.flight_type {
            FlightType::OneWay => {
                // The return field goes dark; pull focus back if it was there.
                self.return_date.set_enabled(false);
                if self.focused == Focus::Return {
                    self.focused = Focus::Departure;
                    self.departure.focus();
                }
            }
            FlightType::Return => self.return_date.set_enabled(true),
        }
    }

    fn switch_focus(&mut self) {
        if self.flight_type == FlightType::OneWay {
            return; // only one editable field
        }
        match self.focused {
            Focus::Departure => {
                self.departure.blur();
                self.return_date.focus();
                self.focused = Focus::Return;
            }
            Focus::Return => {
                self.return_date.blur();
                self.departure.focus();
                self.focused = Focus::Departure;
            }
        }
    }

    fn book(&mut self) {
        if !self.can_book() {
            return;
        }
        self.booked = Some(match self.flight_type {
            FlightType::OneWay => format!(
                "You have booked a one-way flight on {}.",
                self.departure.value()
            ),
            FlightType::Return => format!(
                "You have booked a return flight departing {} and returning {}.",
                self.departure.value(),
                self.return_date.value()
            ),
        });
    }

    /// Routes toggles, focus moves, edits and the book action.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.toggle_type.matches(key_msg) {
                self.toggle_type();
                return None;
            }
            if self.keymap.switch_field.matches(key_msg) {
                self.switch_focus();
                return None;
            }
            if self.keymap.book.matches(key_msg) {
                self.book();
                return None;
            }
            let changed = match self.focused {
                Focus::Departure => self.departure.update(key_msg),
                Focus::Return => self.return_date.update(key_msg),
            };
            if changed {
                self.booked = None;
            }
        }
        None
    }

    /// Renders the form; invalid dates and a disabled book button
    /// are styled accordingly.
    pub fn view(&self) -> String {
        let error_style = Style::new().foreground(Color::from("196"));
        let ok_style = Style::new().foreground(Color::from("34"));

        let date_label = |f: &field::Model, name: &str| -> String {
            if f.is_enabled() && parse_date(f.value()).is_none() {
                format!("{} {}", f.view(), error_style.clone().render(name))
            } else {
                format!("{} {}", f.view(), name)
            }
        };

        let mut lines = vec![
            format!("Flight type: {}", self.flight_type.label()),
            String::new(),
            date_label(&self.departure, "Departure Date"),
            date_label(&self.return_date, "Return Date"),
            String::new(),
        ];
        lines.push(match &self.booked {
            Some(confirmation) => ok_style.render(confirmation),
            None if self.can_book() => "[ Book ]".to_string(),
            None => Style::new().faint(true).render("[ Book ]"),
        });
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn retype_focused(model: &mut Model, text: &str) {
        for _ in 0..16 {
            model.update(&press(KeyCode::Backspace));
        }
        for c in text.chars() {
            model.update(&press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_parse_date_accepts_format() {
        assert_eq!(
            parse_date("24.12.2025"),
            NaiveDate::from_ymd_opt(2025, 12, 24)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2025-12-24").is_none());
        assert!(parse_date("32.01.2025").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_one_way_default_is_bookable() {
        let model = new();
        assert_eq!(model.flight_type(), FlightType::OneWay);
        assert!(model.can_book());
    }

    #[test]
    fn test_return_field_disabled_for_one_way() {
        let mut model = new();
        // Tab must not land focus in the disabled return field.
        model.update(&press(KeyCode::Tab));
        retype_focused(&mut model, "05.05.2025");
        assert_eq!(model.departure_text(), "05.05.2025");
        assert_eq!(model.return_text(), "01.01.2025");
    }

    #[test]
    fn test_toggle_enables_return_field() {
        let mut model = new();
        model.update(&press(KeyCode::Char('t')));
        assert_eq!(model.flight_type(), FlightType::Return);
        model.update(&press(KeyCode::Tab));
        retype_focused(&mut model, "02.01.2025");
        assert_eq!(model.return_text(), "02.01.2025");
    }

    #[test]
    fn test_invalid_departure_blocks_booking() {
        let mut model = new();
        retype_focused(&mut model, "99.99.2025");
        assert!(!model.can_book());
        model.update(&press(KeyCode::Enter));
        assert!(model.booked().is_none());
    }

    #[test]
    fn test_return_before_departure_blocks_booking() {
        let mut model = new();
        model.update(&press(KeyCode::Char('t')));
        retype_focused(&mut model, "10.06.2025");
        model.update(&press(KeyCode::Tab));
        retype_focused(&mut model, "09.06.2025");
        assert!(!model.can_book());
    }

    #[test]
    fn test_return_on_departure_day_is_allowed() {
        let mut model = new();
        model.update(&press(KeyCode::Char('t')));
        assert!(model.can_book()); // both default to the same date
    }

    #[test]
    fn test_booking_one_way() {
        let mut model = new();
        model.update(&press(KeyCode::Enter));
        assert_eq!(
            model.booked(),
            Some("You have booked a one-way flight on 01.01.2025.")
        );
    }

    #[test]
    fn test_booking_return_flight() {
        let mut model = new();
        model.update(&press(KeyCode::Char('t')));
        model.update(&press(KeyCode::Tab));
        retype_focused(&mut model, "15.03.2025");
        model.update(&press(KeyCode::Enter));
        assert_eq!(
            model.booked(),
            Some("You have booked a return flight departing 01.01.2025 and returning 15.03.2025.")
        );
    }

    #[test]
    fn test_editing_clears_previous_confirmation() {
        let mut model = new();
        model.update(&press(KeyCode::Enter));
        assert!(model.booked().is_some());
        model.update(&press(KeyCode::Backspace));
        assert!(model.booked().is_none());
    }

    #[test]
    fn test_toggling_back_pulls_focus_out_of_return_field() {
        let mut model = new();
        model.update(&press(KeyCode::Char('t')));
        model.update(&press(KeyCode::Tab)); // focus return field
        model.update(&press(KeyCode::Char('t'))); // back to one-way
        retype_focused(&mut model, "03.04.2025");
        assert_eq!(model.departure_text(), "03.04.2025");
    }
}
