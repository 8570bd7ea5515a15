//! The full 7GUIs demo: all seven tasks behind a tab bar.
//!
//! Run with `cargo run`. Cycle tabs with `[` and `]`, quit with `q`.

use bubbletea_rs::Program;
use sevenguis_widgets::tabs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<tabs::Model>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
