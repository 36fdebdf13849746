//! nine-go: 9x9 Go against a random-move opponent.
//!
//! ## Usage
//!
//! - `nine-go` - Play in the terminal (same as `nine-go play`)
//! - `nine-go gtp` - Start a GTP server for GUI integration
//!
//! Log output goes to stderr and is controlled with `RUST_LOG`.

use std::io;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use nine_go::ai::Policy;
use nine_go::board::Color;
use nine_go::console::Console;
use nine_go::constants::{AI_THINK_DELAY, KOMI};
use nine_go::game::{Rules, ScoringRule, parse_komi};
use nine_go::gtp::GtpEngine;
use nine_go::session::{AiSettings, Session};

/// nine-go: 9x9 Go with capture, ko and suicide rules
#[derive(Parser)]
#[command(name = "nine-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine in the terminal
    Play,
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
}

#[derive(Args)]
struct Options {
    /// Compensation added to White's count
    #[arg(long, global = true, default_value_t = KOMI, value_parser = parse_komi)]
    komi: f32,

    /// How the final position is counted
    #[arg(long, global = true, value_enum, default_value_t = ScoringArg::Stones)]
    scoring: ScoringArg,

    /// Opponent move selection
    #[arg(long, global = true, value_enum, default_value_t = PolicyArg::Random)]
    policy: PolicyArg,

    /// Color played by the opponent
    #[arg(long, global = true, value_enum, default_value_t = ColorArg::White)]
    ai_color: ColorArg,

    /// Start with the opponent switched off (two humans at one terminal)
    #[arg(long, global = true)]
    no_ai: bool,

    /// Opponent thinking pause in milliseconds
    #[arg(long, global = true, default_value_t = AI_THINK_DELAY.as_millis() as u64)]
    delay_ms: u64,

    /// Seed for the opponent's random choices
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, ValueEnum)]
enum ScoringArg {
    /// Stones on the board only
    Stones,
    /// Stones plus surrounded empty regions
    Area,
}

#[derive(Copy, Clone, ValueEnum)]
enum PolicyArg {
    Random,
    CaptureFirst,
}

#[derive(Copy, Clone, ValueEnum)]
enum ColorArg {
    Black,
    White,
}

impl Options {
    fn rules(&self) -> Rules {
        Rules {
            komi: self.komi,
            scoring: match self.scoring {
                ScoringArg::Stones => ScoringRule::StoneCount,
                ScoringArg::Area => ScoringRule::Area,
            },
        }
    }

    fn policy(&self) -> Policy {
        match self.policy {
            PolicyArg::Random => Policy::Random,
            PolicyArg::CaptureFirst => Policy::CaptureFirst,
        }
    }

    fn ai_settings(&self) -> AiSettings {
        AiSettings {
            enabled: !self.no_ai,
            color: match self.ai_color {
                ColorArg::Black => Color::Black,
                ColorArg::White => Color::White,
            },
            policy: self.policy(),
            think_delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nine_go=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let opts = cli.options;

    match cli.command {
        Some(Commands::Gtp) => {
            tracing::info!("starting GTP server");
            let mut engine = GtpEngine::new(opts.rules(), opts.policy(), opts.seed);
            engine.run()
        }
        Some(Commands::Play) | None => {
            let session = Session::new(opts.rules(), opts.ai_settings());
            let stdin = io::stdin();
            let mut console = Console::new(session, stdin.lock(), io::stdout());
            console.run()
        }
    }
}
