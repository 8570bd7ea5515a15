//! The Timer task: a countdown with live progress, adjustable duration,
//! and a reset action.
//!
//! This is the one 7GUIs task with real state-machine behavior. The model
//! owns three pieces of state — `duration`, `elapsed`, `running` — and is
//! mutated by exactly three entry points:
//!
//! - ticks from a repeating 100 ms command chain ([`Model::advance`]),
//! - duration changes from the slider keys ([`Model::set_duration`]),
//! - an explicit [`Model::reset`].
//!
//! All three run on the program's single message loop, so no locking is
//! needed. Every tick reads the *current* model state; nothing about the
//! countdown is captured inside the scheduled closure except the instance
//! `id` and a chain `tag`. Reset and duration changes therefore take
//! effect on the very next delivered tick. The `tag` is bumped whenever a
//! new tick chain is started so that any still-in-flight tick from the old
//! chain is rejected instead of doubling the tick rate — and a torn-down
//! model simply never matches, which is what cancels the chain on teardown.
//!
//! Elapsed time is measured against the wall clock (the instant of the
//! previous accepted tick), not counted as a fixed 0.1 s per delivery, so
//! scheduling jitter does not accumulate into drift.
//!
//! # Basic usage
//!
//! ```rust
//! use sevenguis_widgets::timer;
//! use std::time::Duration;
//!
//! let engine = timer::new();
//! assert_eq!(engine.duration(), Duration::from_secs(30));
//! assert!(engine.running());
//! let first_tick = engine.init();
//! ```

use crate::key::{self, Binding};
use crate::progress;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

/// Lower bound of the user-adjustable duration.
pub const MIN_DURATION: Duration = Duration::from_secs(1);
/// Upper bound of the user-adjustable duration.
pub const MAX_DURATION: Duration = Duration::from_secs(60);
/// Duration a freshly activated timer starts with.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);
/// The canonical tick cadence.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Step applied per slider keypress.
const DURATION_STEP: Duration = Duration::from_secs(1);

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// One firing of the repeating tick chain.
///
/// Carries only routing data: the instance `id` and the chain `tag`. The
/// countdown state itself is read from the model when the message is
/// processed, never from the message.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Instance that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Sent once when the countdown reaches its duration.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// Instance that finished.
    pub id: i64,
}

/// Key bindings for the timer.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Shortens the duration by one second.
    pub shorter: Binding,
    /// Lengthens the duration by one second.
    pub longer: Binding,
    /// Rewinds the countdown to zero.
    pub reset: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            shorter: Binding::new(vec![KeyCode::Left]).with_help("←", "shorter"),
            longer: Binding::new(vec![KeyCode::Right]).with_help("→", "longer"),
            reset: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
        }
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.shorter, &self.longer, &self.reset]
    }
}

/// The timer engine plus its presentation bits (gauge, key bindings).
#[derive(Debug, Clone)]
pub struct Model {
    duration: Duration,
    elapsed: Duration,
    running: bool,
    id: i64,
    tag: i64,
    last_tick: Option<Instant>,
    gauge: progress::Model,
    keymap: KeyMap,
}

/// Create a running timer with the default 30 s duration.
pub fn new() -> Model {
    new_with_duration(DEFAULT_DURATION)
}

/// Create a running timer with a specific duration (clamped to [1 s, 60 s]).
pub fn new_with_duration(duration: Duration) -> Model {
    Model {
        duration: duration.clamp(MIN_DURATION, MAX_DURATION),
        elapsed: Duration::ZERO,
        running: true,
        id: next_id(),
        tag: 0,
        last_tick: None,
        gauge: progress::new().with_width(30).without_percentage(),
        keymap: KeyMap::default(),
    }
}

impl Model {
    /// Unique identifier of this instance, used to filter messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current duration, always within [1 s, 60 s].
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Elapsed time; never decreases except through [`Model::reset`].
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the countdown is advancing.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Normalized completion ratio, always in [0, 1].
    pub fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// The widget's key bindings, for footer help.
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Advances the countdown by a measured time delta.
    ///
    /// No-op while stopped. Stops the countdown exactly when `elapsed`
    /// reaches `duration`; if the duration was shortened below the current
    /// elapsed time, the next evaluation stops without touching `elapsed`
    /// (elapsed is monotone, only `reset` rewinds it).
    pub fn advance(&mut self, delta: Duration) {
        if !self.running {
            return;
        }
        if self.elapsed < self.duration {
            self.elapsed = (self.elapsed + delta).min(self.duration);
        }
        if self.elapsed >= self.duration {
            self.running = false;
        }
    }

    /// Sets the duration, clamped to [1 s, 60 s].
    ///
    /// A stopped countdown resumes when the new duration leaves room
    /// (`elapsed < duration`) — lengthening past the elapsed time restarts
    /// the chain without requiring a reset. Returns the command for the
    /// restarted chain in that case.
    pub fn set_duration(&mut self, duration: Duration) -> Option<Cmd> {
        self.duration = duration.clamp(MIN_DURATION, MAX_DURATION);
        if !self.running && self.elapsed < self.duration {
            self.running = true;
            Some(self.restart_chain())
        } else {
            None
        }
    }

    /// Rewinds the countdown to zero and (re)starts it. Duration is kept.
    ///
    /// Takes effect immediately: the state is mutated here, and the next
    /// accepted tick advances from `elapsed = 0`. Ticks from the previous
    /// chain carry a stale tag and are dropped.
    pub fn reset(&mut self) -> Cmd {
        self.elapsed = Duration::ZERO;
        self.running = true;
        self.restart_chain()
    }

    /// Starts a fresh tick chain, invalidating any in-flight tick.
    fn restart_chain(&mut self) -> Cmd {
        self.tag += 1;
        self.last_tick = None;
        self.tick()
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(TICK_INTERVAL, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn finished(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(FinishedMsg { id }) as Msg
        })
    }

    /// The command that starts the tick chain. Schedule this when the
    /// timer view is activated.
    pub fn init(&self) -> Cmd {
        self.tick()
    }

    /// Folds tick and key messages into the engine.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id || tick_msg.tag != self.tag || !self.running {
                return None;
            }
            let now = Instant::now();
            // First tick of a chain has no predecessor to measure against;
            // charge it the nominal interval.
            let delta = match self.last_tick {
                Some(previous) => now.duration_since(previous),
                None => TICK_INTERVAL,
            };
            self.last_tick = Some(now);
            self.advance(delta);
            return if self.running {
                Some(self.tick())
            } else {
                Some(self.finished())
            };
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.reset.matches(key_msg) {
                return Some(self.reset());
            }
            if self.keymap.shorter.matches(key_msg) {
                return self.set_duration(self.duration.saturating_sub(DURATION_STEP));
            }
            if self.keymap.longer.matches(key_msg) {
                return self.set_duration(self.duration.saturating_add(DURATION_STEP));
            }
        }

        None
    }

    /// Renders the gauge, the numeric labels and the reset hint.
    pub fn view(&self) -> String {
        format!(
            "Elapsed time: {}\n\n{:.1}s\n\nDuration: {:.0}s\n\n[ Reset ]",
            self.gauge.view_as(self.progress()),
            self.elapsed.as_secs_f64(),
            self.duration.as_secs_f64(),
        )
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let model = new();
        let cmd = model.init();
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(&msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
