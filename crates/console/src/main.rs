//! Chessout console
//!
//! Paste or load a chess game, step through its positions, and see engine
//! analysis for whichever position is on screen. Parsing and analysis are
//! delegated to the Chess Out API; move legality is checked locally.

use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use console::app::App;
use console::commands::{self, Command};
use console::config::Config;
use console::display;
use replay_core::analysis::Completion;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    info!(
        api = %config.api_base_url,
        depth = config.analysis_depth,
        multipv = config.analysis_multipv,
        "Chessout starting"
    );

    let (mut app, mut events) = App::new(config);
    app.probe_health().await;

    // A positional argument names a PGN file to load right away
    if let Some(path) = std::env::args().nth(1) {
        load_and_submit(&mut app, Path::new(&path)).await;
    }
    app.request_analysis();

    show(&mut app);
    println!("Type help for commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    // While Some, input lines are collected as PGN until a lone "."
    let mut pasting: Option<Vec<String>> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break; // stdin closed
                };

                if let Some(buffer) = pasting.as_mut() {
                    if line.trim() == "." {
                        let pgn = buffer.join("\n");
                        pasting = None;
                        app.submit_pgn(&pgn).await;
                        show(&mut app);
                    } else {
                        buffer.push(line);
                    }
                    continue;
                }

                match commands::parse(&line) {
                    None => {}
                    Some(Err(message)) => println!("{message}"),
                    Some(Ok(command)) => {
                        if !run_command(&mut app, command, &mut pasting).await {
                            break;
                        }
                    }
                }
            }
            event = events.recv() => {
                let Some(event) = event else { break };
                // Stale completions change nothing on screen
                if app.handle_event(event) != Completion::Discarded {
                    show(&mut app);
                }
            }
        }
    }

    Ok(())
}

/// Execute one command. Returns `false` when the loop should exit.
async fn run_command(app: &mut App, command: Command, pasting: &mut Option<Vec<String>>) -> bool {
    match command {
        Command::Paste => {
            *pasting = Some(Vec::new());
            println!("Paste PGN; finish with a single . on its own line.");
        }
        Command::Load(path) => {
            load_and_submit(app, &path).await;
            show(app);
        }
        Command::Next => {
            if app.step_forward() {
                show(app);
            } else {
                println!("Already at the last position.");
            }
        }
        Command::Prev => {
            if app.step_back() {
                show(app);
            } else {
                println!("Already at the starting position.");
            }
        }
        Command::Goto(index) => {
            app.go_to(index);
            show(app);
        }
        Command::Move(request) => {
            if app.play_request(&request) {
                show(app);
            } else {
                println!("Illegal move.");
            }
        }
        Command::Play(rank) => match app.play_suggestion(rank) {
            Ok(()) => show(app),
            Err(message) => println!("{message}"),
        },
        Command::Best => match app.best_move().await {
            Ok(text) => println!("{text}"),
            Err(detail) => println!("Best move unavailable: {detail}"),
        },
        Command::Show => show(app),
        Command::Reset => {
            app.reset();
            show(app);
        }
        Command::Help => println!("{}", commands::HELP),
        Command::Quit => return false,
    }
    true
}

/// Read a PGN file and hand it to the notation parser. Unreadable files are
/// reported, never fatal.
async fn load_and_submit(app: &mut App, path: &Path) {
    match tokio::fs::read_to_string(path).await {
        Ok(pgn) => {
            app.submit_pgn(&pgn).await;
        }
        Err(err) => println!("Cannot read {}: {}", path.display(), err),
    }
}

/// Render the current state and drain any pending status message.
fn show(app: &mut App) {
    println!("{}", display::render(app.session()));
    if let Some(status) = app.take_status() {
        println!("{status}");
    }
}
