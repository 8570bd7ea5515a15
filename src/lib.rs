#![warn(missing_docs)]

//! # sevenguis-widgets
//!
//! The classic [7GUIs](https://eugenkiss.github.io/7guis/) benchmark tasks
//! implemented as reusable TUI components for
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! Each task is a self-contained widget following the Elm Architecture:
//! a constructor, an `update()` that folds messages into state, and a
//! `view()` that renders a string. The [`tabs`] module ties them together
//! into the familiar one-window, seven-tabs demo shell.
//!
//! | Module | Task | What it exercises |
//! |--------|------|-------------------|
//! | [`counter`] | Counter | simple mutation |
//! | [`converter`] | Temperature Converter | bidirectional data binding |
//! | [`flight`] | Flight Booker | form validation, conditional enable |
//! | [`timer`] | Timer | tick-driven state, staleness, reset |
//! | [`tabs`] | the shell | component-local state, tab lifecycle |
//!
//! CRUD, Circle Drawer and Cells are placeholder panels in the shell.
//!
//! The interesting one is [`timer`]: a countdown advanced by a repeating
//! 100 ms command chain, with a user-adjustable duration and a reset that
//! must be visible on the very next tick. See its module docs for how the
//! id/tag message filtering keeps stale ticks from corrupting the state.
//!
//! ## Quick start
//!
//! ```rust
//! use sevenguis_widgets::prelude::*;
//! use bubbletea_rs::Model as BubbleTeaModel;
//!
//! // The shell is a complete bubbletea-rs model; a Program can run it
//! // directly. Widgets can just as well be embedded individually:
//! let engine = timer_new();
//! assert!(engine.running());
//! let (shell, _cmd) = TabsModel::init();
//! assert_eq!(shell.active(), Tab::Counter);
//! ```

pub mod converter;
pub mod counter;
pub mod field;
pub mod flight;
pub mod key;
pub mod progress;
pub mod tabs;
pub mod timer;

pub use converter::{
    celsius_to_fahrenheit, fahrenheit_to_celsius, new as converter_new, Model as Converter,
};
pub use counter::{new as counter_new, Model as Counter};
pub use field::{new as field_new, Model as Field};
pub use flight::{new as flight_new, FlightType, Model as FlightBooker};
pub use key::{help_line, Binding, KeyMap};
pub use progress::{new as progress_new, Model as Progress};
pub use tabs::{new as tabs_new, Model as TabsModel, Tab};
pub use timer::{
    new as timer_new, new_with_duration as timer_new_with_duration, FinishedMsg as TimerFinishedMsg,
    Model as Timer, TickMsg as TimerTickMsg,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::converter::{
        celsius_to_fahrenheit, fahrenheit_to_celsius, new as converter_new, Model as Converter,
    };
    pub use crate::counter::{new as counter_new, Model as Counter};
    pub use crate::field::{new as field_new, Model as Field};
    pub use crate::flight::{new as flight_new, FlightType, Model as FlightBooker};
    pub use crate::key::{help_line, Binding, KeyMap};
    pub use crate::progress::{new as progress_new, Model as Progress};
    pub use crate::tabs::{new as tabs_new, Model as TabsModel, Tab};
    pub use crate::timer::{
        new as timer_new, new_with_duration as timer_new_with_duration,
        FinishedMsg as TimerFinishedMsg, Model as Timer, TickMsg as TimerTickMsg,
    };
}
