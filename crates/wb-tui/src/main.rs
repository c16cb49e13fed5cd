//! Standalone binary for the Wordbingo caller.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use wb_core::WordList;
use wb_tui::app::BingoApp;
use wb_tui::audio::Cue;
use wb_tui::logging::{LogConfig, init_logging};

#[derive(Parser)]
#[command(
    name = "wordbingo",
    about = "Call out random words from a pool, one roll at a time",
    version
)]
struct Args {
    /// JSON word list: {"words": [...]} or a bare array (default: built-in list)
    #[arg(long)]
    words: Option<PathBuf>,

    /// RNG seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the roll beep (sound needs a build with `--features audio`)
    #[arg(long)]
    mute: bool,

    /// Start in presentation mode
    #[arg(long)]
    presentation: bool,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let log_config = LogConfig::from_verbosity(args.verbose, args.log_file.clone());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("error: cannot open log file: {e}");
        process::exit(1);
    }

    let words = match &args.words {
        Some(path) => match WordList::load(path) {
            Ok(list) => list,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        },
        None => WordList::builtin(),
    };
    if words.is_empty() {
        tracing::warn!("word list is empty; rolls will do nothing");
    }

    let cue = if args.mute {
        Cue::silent()
    } else {
        Cue::open_default()
    };

    let mut app = BingoApp::new(words, args.seed, cue);
    app.presentation = args.presentation;
    tracing::info!(
        words = app.machine.pool().remaining_count(),
        audio = app.cue.is_available(),
        "starting wordbingo"
    );

    if let Err(e) = wb_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
