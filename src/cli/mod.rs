//! # CLI Module
//!
//! User-facing commands of the jazz preview player. Each command wires the
//! management and Spotify layers together and reports progress and failures
//! with the console macros.
//!
//! ## Commands
//!
//! - [`play`] - Runs a player session, reads transport commands from stdin
//!   and applies status events from the audio surface
//! - [`tracks`] - Prints the playlist the session would play as a table
//! - [`token`] - Acquires an access token and shows when it expires
//!
//! ## Usage
//!
//! ```bash
//! jazzbox play      # play previews on the default audio device
//! jazzbox tracks    # list playable tracks
//! jazzbox token     # check the client credentials
//! ```

mod play;
mod token;
mod tracks;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use play::Transport;
pub use play::play;
pub use token::token;
pub use tracks::tracks;

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
