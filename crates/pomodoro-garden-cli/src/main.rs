use clap::{Parser, Subcommand};
use pomodoro_garden_core::Locale;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod terminal;

/// Environment variable holding the log filter, e.g. `debug` or
/// `pomodoro_garden_core=info`.
const LOG_ENV: &str = "POMODORO_GARDEN_LOG";

#[derive(Parser)]
#[command(name = "pomodoro-garden", version, about = "Pomodoro Garden CLI")]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Inspect and tend the garden
    Garden {
        #[command(subcommand)]
        action: commands::garden::GardenAction,
    },
    /// Show or change the color theme
    Theme {
        #[arg(value_enum)]
        choice: Option<commands::prefs::ThemeChoice>,
    },
    /// Show or change the interface language (es, pt, en)
    Lang { locale: Option<Locale> },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Garden { action } => commands::garden::run(action),
        Commands::Theme { choice } => commands::prefs::theme(choice),
        Commands::Lang { locale } => commands::prefs::lang(locale),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
