use reqwest::Client;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    error, info,
    management::{AudioSurface, Phase, Session},
    success, utils,
    view::View,
    warning,
};

/// One line of user input in the interactive player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Next,
    Previous,
    Toggle,
    List,
    Quit,
    Unknown(String),
}

impl Transport {
    /// An empty line toggles play/pause.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" | "t" | "toggle" => Transport::Toggle,
            "n" | "next" => Transport::Next,
            "p" | "prev" | "previous" => Transport::Previous,
            "l" | "list" => Transport::List,
            "q" | "quit" | "exit" => Transport::Quit,
            other => Transport::Unknown(other.to_string()),
        }
    }
}

pub async fn play() {
    let (surface, mut events) = match AudioSurface::new(Client::new()) {
        Ok(opened) => opened,
        Err(e) => error!("Cannot open audio surface. Err: {}", e),
    };

    let mut session = match Session::from_env(surface) {
        Ok(session) => session,
        Err(e) => error!("Cannot start player. Err: {}", e),
    };

    info!(
        "Searching up to {} tracks for {}",
        session.settings().limit,
        session.settings().query
    );

    let pb = super::spinner("Fetching previews...");
    let interrupted = tokio::select! {
        _ = session.start() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    pb.finish_and_clear();

    if interrupted {
        session.controller_mut().unmount();
        warning!("Interrupted before the playlist arrived");
        return;
    }

    match session.phase() {
        Phase::AwaitingToken => error!(
            "Could not acquire an access token. Check SPOTIFY_API_AUTH_CLIENT_ID and SPOTIFY_API_AUTH_CLIENT_SECRET."
        ),
        Phase::NoPlayableTrack => warning!("No playable previews found"),
        _ => {}
    }

    let controller = session.controller_mut();
    println!(
        "{}",
        View::from_state(controller.state(), controller.phase()).render()
    );
    controller.subscribe(|state, phase| {
        println!("\n{}", View::from_state(state, phase).render());
    });

    info!("Commands: [n]ext, [p]rev, [t]oggle (or Enter), [l]ist, [q]uit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            Some(status) = events.recv() => {
                controller.on_surface_status(status);
                continue;
            }
            _ = tokio::signal::ctrl_c() => break,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Failed to read input: {}", e);
                break;
            }
        };

        match Transport::parse(&line) {
            Transport::Next => {
                if !controller.next() {
                    info!("Already at the last track");
                }
            }
            Transport::Previous => {
                if !controller.previous() {
                    info!("Already at the first track");
                }
            }
            Transport::Toggle => {
                controller.toggle();
            }
            Transport::List => {
                let rows = utils::track_table_rows(&controller.state().playlist);
                println!("{}", tabled::Table::new(rows));
            }
            Transport::Quit => break,
            Transport::Unknown(cmd) => warning!("Unknown command: {}", cmd),
        }
    }

    controller.unmount();
    success!("Stopped");
}
