//! A static progress gauge.
//!
//! Renders a fixed-width bar for a value in `[0.0, 1.0]`. There is no
//! animation state here: the timer widget re-renders at its own tick rate,
//! which is frequent enough for smooth motion, so the gauge only needs
//! [`Model::view_as`].
//!
//! ```rust
//! use sevenguis_widgets::progress;
//!
//! let gauge = progress::new().with_width(10).without_percentage();
//! let bar = gauge.view_as(0.5);
//! ```

use lipgloss_extras::lipgloss::{Color, Style};

const DEFAULT_WIDTH: usize = 40;
const DEFAULT_FULL_COLOR: &str = "#7571F9";
const DEFAULT_EMPTY_COLOR: &str = "#606060";

/// A fixed-width progress gauge.
#[derive(Debug, Clone)]
pub struct Model {
    width: usize,
    full: char,
    empty: char,
    full_style: Style,
    empty_style: Style,
    show_percentage: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            full: '█',
            empty: '░',
            full_style: Style::new().foreground(Color::from(DEFAULT_FULL_COLOR)),
            empty_style: Style::new().foreground(Color::from(DEFAULT_EMPTY_COLOR)),
            show_percentage: true,
        }
    }
}

/// Create a gauge with default fill characters and colors.
pub fn new() -> Model {
    Model::default()
}

impl Model {
    /// Builder: bar width in characters.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets a solid color for the filled portion (hex code or ANSI name).
    pub fn with_solid_fill(mut self, color: &str) -> Self {
        self.full_style = Style::new().foreground(Color::from(color));
        self
    }

    /// Builder: characters for the filled and empty sections.
    pub fn with_fill_characters(mut self, full: char, empty: char) -> Self {
        self.full = full;
        self.empty = empty;
        self
    }

    /// Hides the trailing percentage text.
    pub fn without_percentage(mut self) -> Self {
        self.show_percentage = false;
        self
    }

    /// The configured bar width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Renders the bar for the given ratio. Out-of-range input is clamped
    /// to `[0, 1]` rather than rejected.
    pub fn view_as(&self, percent: f64) -> String {
        let percent = percent.clamp(0.0, 1.0);
        let filled = ((self.width as f64) * percent).round() as usize;
        let filled = filled.min(self.width);

        let full_part: String = self.full.to_string().repeat(filled);
        let empty_part: String = self.empty.to_string().repeat(self.width - filled);
        let bar = format!(
            "{}{}",
            self.full_style.clone().inline(true).render(&full_part),
            self.empty_style.clone().inline(true).render(&empty_part)
        );

        if self.show_percentage {
            format!("{} {:3.0}%", bar, percent * 100.0)
        } else {
            bar
        }
    }
}
