//! The demo shell: a sidebar of the seven tasks and the active task's panel.
//!
//! Each tab's state lives in its own widget model owned by this shell —
//! there is no ambient shared state. The Timer tab additionally has an
//! activation lifecycle: its engine is constructed when the tab is entered
//! and dropped when the tab is left, so a backgrounded timer cannot keep a
//! tick chain alive (in-flight ticks stop matching and are discarded).
//!
//! CRUD, Circle Drawer and Cells are placeholder panels only.

use crate::key::{self, Binding};
use crate::{converter, counter, flight, timer};
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss::{self, Color, Style};
use once_cell::sync::Lazy;

/// The seven 7GUIs tasks, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Simple mutation.
    Counter,
    /// Bidirectional data binding.
    TemperatureConverter,
    /// Form validation.
    FlightBooker,
    /// Tick-driven countdown.
    Timer,
    /// Placeholder panel.
    Crud,
    /// Placeholder panel.
    CircleDrawer,
    /// Placeholder panel.
    Cells,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 7] = [
        Tab::Counter,
        Tab::TemperatureConverter,
        Tab::FlightBooker,
        Tab::Timer,
        Tab::Crud,
        Tab::CircleDrawer,
        Tab::Cells,
    ];

    /// Sidebar label of the tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Counter => "Counter",
            Tab::TemperatureConverter => "Temperature Converter",
            Tab::FlightBooker => "Flight Booker",
            Tab::Timer => "Timer",
            Tab::Crud => "CRUD",
            Tab::CircleDrawer => "Circle Drawer",
            Tab::Cells => "Cells",
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Global key bindings of the shell.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Moves to the next tab.
    pub next_tab: Binding,
    /// Moves to the previous tab.
    pub prev_tab: Binding,
    /// Leaves the demo.
    pub quit: Binding,
    /// Leaves the demo regardless of state.
    pub force_quit: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            next_tab: Binding::new(vec![KeyCode::Char(']')]).with_help("]", "next tab"),
            // Terminals report shift+tab as BackTab, with or without the
            // SHIFT modifier attached. Plain tab stays with the widgets
            // that switch fields.
            prev_tab: Binding::new_with_modifiers(vec![
                (KeyCode::Char('['), KeyModifiers::NONE),
                (KeyCode::BackTab, KeyModifiers::NONE),
                (KeyCode::BackTab, KeyModifiers::SHIFT),
            ])
            .with_help("[", "prev tab"),
            quit: Binding::new(vec![KeyCode::Char('q'), KeyCode::Esc]).with_help("q", "quit"),
            force_quit: Binding::new_with_modifiers(vec![(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            )])
            .with_help("ctrl+c", "force quit"),
        }
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_tab, &self.next_tab, &self.quit]
    }
}

static SIDEBAR_TITLE_STYLE: Lazy<Style> = Lazy::new(|| Style::new().bold(true).padding(0, 1, 1, 1));
static ACTIVE_TAB_STYLE: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .foreground(Color::from("212"))
        .bold(true)
        .padding(0, 1, 0, 1)
});
static INACTIVE_TAB_STYLE: Lazy<Style> = Lazy::new(|| Style::new().padding(0, 1, 0, 1));
static PANEL_STYLE: Lazy<Style> = Lazy::new(|| Style::new().padding(1, 0, 0, 3));
static FOOTER_STYLE: Lazy<Style> = Lazy::new(|| Style::new().faint(true).padding(1, 0, 0, 1));

/// The demo shell model.
pub struct Model {
    active: Tab,
    counter: counter::Model,
    converter: converter::Model,
    flight: flight::Model,
    /// Present only while the Timer tab is active; dropping it is the
    /// tick chain's cancellation.
    timer: Option<timer::Model>,
    keymap: KeyMap,
}

/// Create the shell on the Counter tab, like the original demo.
pub fn new() -> Model {
    Model {
        active: Tab::Counter,
        counter: counter::new(),
        converter: converter::new(),
        flight: flight::new(),
        timer: None,
        keymap: KeyMap::default(),
    }
}

impl Model {
    /// The currently shown tab.
    pub fn active(&self) -> Tab {
        self.active
    }

    /// The live timer engine, if the Timer tab is active.
    pub fn timer(&self) -> Option<&timer::Model> {
        self.timer.as_ref()
    }

    /// Switches to a tab, tearing down the old tab's transient state and
    /// activating the new one. Returns the new tab's startup command.
    pub fn select(&mut self, tab: Tab) -> Option<Cmd> {
        if tab == self.active {
            return None;
        }
        if self.active == Tab::Timer {
            self.timer = None;
        }
        self.active = tab;
        if tab == Tab::Timer {
            // A fresh engine per activation: 30 s, elapsed 0, running.
            let engine = timer::new();
            let cmd = engine.init();
            self.timer = Some(engine);
            return Some(cmd);
        }
        None
    }

    fn footer(&self) -> String {
        let mut bindings = key::KeyMap::short_help(&self.keymap);
        let widget_bindings = match self.active {
            Tab::Counter => key::KeyMap::short_help(self.counter.keymap()),
            Tab::TemperatureConverter => key::KeyMap::short_help(self.converter.keymap()),
            Tab::FlightBooker => key::KeyMap::short_help(self.flight.keymap()),
            Tab::Timer => self
                .timer
                .as_ref()
                .map(|t| key::KeyMap::short_help(t.keymap()))
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        bindings.extend(widget_bindings);
        key::help_line(&bindings)
    }

    fn sidebar(&self) -> String {
        let mut lines = vec![SIDEBAR_TITLE_STYLE.render("7GUIs Problems")];
        for tab in Tab::ALL {
            let style = if tab == self.active {
                &ACTIVE_TAB_STYLE
            } else {
                &INACTIVE_TAB_STYLE
            };
            lines.push(style.render(tab.title()));
        }
        lines.join("\n")
    }

    fn panel(&self) -> String {
        let body = match self.active {
            Tab::Counter => self.counter.view(),
            Tab::TemperatureConverter => self.converter.view(),
            Tab::FlightBooker => self.flight.view(),
            Tab::Timer => self
                .timer
                .as_ref()
                .map(|t| t.view())
                .unwrap_or_default(),
            Tab::Crud => "CRUD Problem Content".to_string(),
            Tab::CircleDrawer => "Circle Drawer Problem Content".to_string(),
            Tab::Cells => "Cells Problem Content".to_string(),
        };
        PANEL_STYLE.render(&body)
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.force_quit.matches(key_msg) || self.keymap.quit.matches(key_msg) {
                return Some(quit());
            }
            if self.keymap.next_tab.matches(key_msg) {
                let next = self.active.next();
                return self.select(next);
            }
            if self.keymap.prev_tab.matches(key_msg) {
                let prev = self.active.prev();
                return self.select(prev);
            }
        }

        // The engine only exists while the Timer tab is active, so its
        // arm below also carries tick/finished messages; after teardown
        // there is no engine and they fall on the floor.
        match self.active {
            Tab::Counter => self.counter.update(&msg),
            Tab::TemperatureConverter => self.converter.update(&msg),
            Tab::FlightBooker => self.flight.update(&msg),
            Tab::Timer => self.timer.as_mut().and_then(|t| t.update(&msg)),
            _ => None,
        }
    }

    fn view(&self) -> String {
        let columns = [self.sidebar(), self.panel()];
        let column_refs: Vec<&str> = columns.iter().map(String::as_str).collect();
        let layout = lipgloss::join_horizontal(lipgloss::TOP, &column_refs);
        format!("{}\n{}", layout, FOOTER_STYLE.render(&self.footer()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn press(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_starts_on_counter_tab() {
        let (model, cmd) = Model::init();
        assert_eq!(model.active(), Tab::Counter);
        assert!(cmd.is_none());
        assert!(model.timer().is_none());
    }

    #[test]
    fn test_tab_order_wraps_around() {
        assert_eq!(Tab::Cells.next(), Tab::Counter);
        assert_eq!(Tab::Counter.prev(), Tab::Cells);
    }

    #[test]
    fn test_bracket_keys_cycle_tabs() {
        let mut model = new();
        model.update(press(KeyCode::Char(']')));
        assert_eq!(model.active(), Tab::TemperatureConverter);
        model.update(press(KeyCode::Char('[')));
        assert_eq!(model.active(), Tab::Counter);
    }

    #[test]
    fn test_shift_tab_cycles_backwards() {
        let mut model = new();
        let back_tab: Msg = Box::new(KeyMsg {
            key: KeyCode::BackTab,
            modifiers: KeyModifiers::SHIFT,
        });
        model.update(back_tab);
        assert_eq!(model.active(), Tab::Cells);

        // Some terminals omit the modifier on BackTab.
        model.update(press(KeyCode::BackTab));
        assert_eq!(model.active(), Tab::CircleDrawer);
    }

    #[test]
    fn test_plain_tab_stays_with_the_active_widget() {
        let mut model = new();
        model.select(Tab::TemperatureConverter);
        model.update(press(KeyCode::Tab));
        // Tab switches converter fields, it does not change tabs.
        assert_eq!(model.active(), Tab::TemperatureConverter);
    }

    #[test]
    fn test_entering_timer_tab_starts_a_fresh_engine() {
        let mut model = new();
        let cmd = model.select(Tab::Timer);
        assert!(cmd.is_some()); // the first tick command
        let engine = model.timer().expect("engine active");
        assert_eq!(engine.elapsed(), Duration::ZERO);
        assert_eq!(engine.duration(), timer::DEFAULT_DURATION);
        assert!(engine.running());
    }

    #[test]
    fn test_leaving_timer_tab_tears_the_engine_down() {
        let mut model = new();
        model.select(Tab::Timer);
        model.select(Tab::Counter);
        assert!(model.timer().is_none());
    }

    #[test]
    fn test_timer_keys_route_while_the_tab_is_active() {
        let mut model = new();
        model.select(Tab::Timer);
        // The reset key reaches the engine and schedules a fresh chain.
        assert!(model.update(press(KeyCode::Char('r'))).is_some());
    }

    #[test]
    fn test_ticks_after_teardown_are_discarded() {
        let mut model = new();
        model.select(Tab::Timer);
        let id = model.timer().expect("engine active").id();
        model.select(Tab::Counter);

        // A tick from the torn-down chain must neither panic nor yield
        // a follow-up command.
        let stale: Msg = Box::new(timer::FinishedMsg { id });
        assert!(model.update(stale).is_none());
    }

    #[test]
    fn test_reentering_timer_tab_starts_over() {
        let mut model = new();
        model.select(Tab::Timer);
        model.select(Tab::Counter);
        model.select(Tab::Timer);
        let engine = model.timer().expect("engine active");
        assert_eq!(engine.elapsed(), Duration::ZERO);
        assert!(engine.running());
    }

    #[test]
    fn test_keys_route_to_the_active_widget_only() {
        let mut model = new();
        model.update(press(KeyCode::Enter));
        assert_eq!(model.counter.count(), 1);

        model.select(Tab::FlightBooker);
        model.update(press(KeyCode::Enter));
        // Enter on the flight tab books a flight, it does not increment.
        assert_eq!(model.counter.count(), 1);
        assert!(model.flight.booked().is_some());
    }

    #[test]
    fn test_quit_key_produces_a_command() {
        let mut model = new();
        assert!(model.update(press(KeyCode::Char('q'))).is_some());
    }

    #[test]
    fn test_placeholder_tabs_render_their_labels() {
        let mut model = new();
        model.select(Tab::Crud);
        assert!(BubbleTeaModel::view(&model).contains("CRUD Problem Content"));
        model.select(Tab::Cells);
        assert!(BubbleTeaModel::view(&model).contains("Cells Problem Content"));
    }

    #[test]
    fn test_sidebar_lists_all_seven_tasks() {
        let model = new();
        let view = BubbleTeaModel::view(&model);
        for tab in Tab::ALL {
            assert!(view.contains(tab.title()), "missing {}", tab.title());
        }
    }

    #[test]
    fn test_footer_shows_widget_bindings() {
        let mut model = new();
        model.select(Tab::Timer);
        let view = BubbleTeaModel::view(&model);
        assert!(view.contains("r reset"));
    }
}
