use clap::{Parser, Subcommand};
use gesture_deck::config::{self, DeckConfig};
use gesture_deck::deck::Deck;
use gesture_deck::effects::Effect;
use gesture_deck::output::{self, FrameReport};
use gesture_deck::playback::{Playback, TICK_INTERVAL, TickEvent};
use gesture_deck::scan;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "GESTURE_DECK_LOG";

fn version_string() -> &'static str {
    let on_tag = env!("DECK_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("DECK_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "gesture-deck")]
#[command(about = "Timed gesture-drawing sessions from a folder of photos and videos")]
#[command(long_about = "\
Timed gesture-drawing sessions from a folder of photos and videos

Point --source at a folder of references. Each session draws random items
from it; videos contribute one random frame each. Stills can be restyled
with effects (Gray, Sketch, Sepia, Flip H, Zoom+, ...).

Media structure:

  references/
  ├── gesture-deck.toml   # Optional config (see gen-config)
  ├── pose-01.jpg         # Images: jpg jpeg png bmp webp
  ├── pose-02.webp
  ├── dance.mp4           # Videos: mp4 mov avi mkv (needs ffmpeg on PATH)
  └── notes.txt           # Anything else is ignored

Logging: set GESTURE_DECK_LOG (e.g. GESTURE_DECK_LOG=debug) or pass --verbose.

Run 'gesture-deck gen-config' to generate a documented gesture-deck.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Media directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Config file (defaults to gesture-deck.toml in the media directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by commands that draw a session.
#[derive(clap::Args, Clone)]
struct DrawArgs {
    /// Items per session (overrides config)
    #[arg(long)]
    length: Option<usize>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// List the images and videos found in the media directory
    Scan,
    /// Draw a session and print it
    Session {
        #[command(flatten)]
        draw: DrawArgs,

        /// Print the session as JSON
        #[arg(long)]
        json: bool,
    },
    /// Acquire one session item, apply effects and report the result
    Inspect {
        /// Zero-based session index
        index: usize,

        /// Comma-separated effect names, applied in order
        #[arg(long, default_value = "")]
        effects: String,

        #[command(flatten)]
        draw: DrawArgs,
    },
    /// Walk through a session with a countdown per item
    Play {
        #[command(flatten)]
        draw: DrawArgs,

        /// Seconds per item (overrides config)
        #[arg(long)]
        duration: Option<f64>,

        /// Start over after the last item instead of stopping
        #[arg(long = "loop")]
        looping: bool,

        /// Comma-separated effect names applied to every item
        #[arg(long, default_value = "")]
        effects: String,
    },
    /// List recognized effect names
    Effects,
    /// Print a stock gesture-deck.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan => {
            let inventory = scan::scan(&cli.source)?;
            output::print_inventory(&inventory, &cli.source);
        }
        Command::Session { draw, json } => {
            let mut config = resolve_config(&cli.source, cli.config.as_deref())?;
            config.override_session(draw.length, None, false)?;
            let mut deck = Deck::from_config_with_rng(&config, rng_for(draw.seed));
            deck.load_session(&cli.source, config.session.length);
            if json {
                println!("{}", serde_json::to_string_pretty(deck.session())?);
            } else {
                output::print_session(deck.session(), &cli.source);
            }
        }
        Command::Inspect {
            index,
            effects,
            draw,
        } => {
            let applied = parse_effects(&effects)?;
            let mut config = resolve_config(&cli.source, cli.config.as_deref())?;
            config.override_session(draw.length, None, false)?;
            let mut deck = Deck::from_config_with_rng(&config, rng_for(draw.seed));
            let len = deck.load_session(&cli.source, config.session.length);
            if deck.get_frame(index).is_none() {
                return Err(format!("index {index} out of range for session of {len}").into());
            }
            for effect in &applied {
                deck.apply_effect(*effect);
            }

            if let (Some(entry), Some(frame), Some(origin)) = (
                deck.session().get(index),
                deck.display_frame(),
                deck.last_origin(),
            ) {
                let report = FrameReport {
                    index,
                    entry,
                    frame,
                    origin,
                    applied: &applied,
                    state: deck.effect_state(),
                };
                output::print_frame_report(&report, &cli.source);
            }
        }
        Command::Play {
            draw,
            duration,
            looping,
            effects,
        } => {
            let applied = parse_effects(&effects)?;
            let mut config = resolve_config(&cli.source, cli.config.as_deref())?;
            config.override_session(draw.length, duration, looping)?;
            play(&config, &cli.source, draw.seed, &applied);
        }
        Command::Effects => {
            output::print_effect_list();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr `fmt` subscriber.
///
/// `--verbose` forces `debug` for this crate; otherwise the filter comes from
/// `GESTURE_DECK_LOG`, defaulting to `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gesture_deck=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Explicit `--config` wins; otherwise look in the media directory.
fn resolve_config(source: &Path, explicit: Option<&Path>) -> Result<DeckConfig, config::ConfigError> {
    match explicit {
        Some(path) => config::load_config_file(path),
        None => config::load_config(source),
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy)
}

fn parse_effects(list: &str) -> Result<Vec<Effect>, gesture_deck::effects::UnknownEffect> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

/// Headless drill: show each item for the configured duration, ticking the
/// countdown every [`TICK_INTERVAL`]. With `loop` set it runs until killed.
fn play(config: &DeckConfig, source: &Path, seed: Option<u64>, effects: &[Effect]) {
    let mut deck = Deck::from_config_with_rng(config, rng_for(seed));
    let len = deck.load_session(source, config.session.length);
    if len == 0 {
        println!("No usable media in {}", source.display());
        return;
    }

    let mut playback =
        Playback::new(len, config.item_duration()).with_looping(config.session.looping);
    playback.start();
    show_item(&mut deck, &mut playback, source, effects);

    let mut since_print = Duration::ZERO;
    loop {
        std::thread::sleep(TICK_INTERVAL);
        match playback.tick(TICK_INTERVAL) {
            TickEvent::Continue => {
                since_print += TICK_INTERVAL;
                if since_print >= Duration::from_secs(1) {
                    since_print = Duration::ZERO;
                    if let Some(entry) = deck.session().get(playback.index()) {
                        output::print_playback_line(&playback, entry, source);
                    }
                }
            }
            TickEvent::Advance(_) => {
                since_print = Duration::ZERO;
                show_item(&mut deck, &mut playback, source, effects);
            }
            TickEvent::Finished => {
                println!("Session complete: {len} items");
                break;
            }
        }
    }
}

fn show_item(deck: &mut Deck, playback: &mut Playback, source: &Path, effects: &[Effect]) {
    let index = playback.index();
    if let Some(frame) = deck.get_frame(index) {
        tracing::debug!(index, width = frame.width(), height = frame.height(), "showing item");
    }
    if !effects.is_empty() {
        for effect in effects {
            deck.apply_effect(*effect);
        }
        // Restyled items get their full duration.
        playback.restart_countdown();
    }
    if let Some(entry) = deck.session().get(index) {
        output::print_playback_line(playback, entry, source);
    }
}
