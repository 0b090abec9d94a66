use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod commands;

use commands::run::{RunArgs, Strategy};

#[derive(Parser)]
#[command(name = "logoscout")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "A CLI tool for collecting company logo image URLs via Google Images",
    long_about = "Logoscout drives a visible Chrome window through a Google Images search for \
                  each input website, pauses for a human to solve CAPTCHAs and pick the right \
                  image, then records the chosen logo URL in a CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search each input website's logo and record the selected image URL
    Run {
        /// File with one website URL per line ('#' starts a comment)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Website URL to process (repeatable, appended after --input)
        #[arg(long = "url", value_name = "URL")]
        urls: Vec<String>,

        /// Output CSV path
        #[arg(short, long, default_value = "logo_urls.csv")]
        output: PathBuf,

        /// How the logo URL is pulled out of the preview panel
        #[arg(long, value_enum, default_value_t = Strategy::Clipboard)]
        strategy: Strategy,

        /// Literal appended to each site name to form the search query
        #[arg(long, default_value = "logo")]
        suffix: String,

        /// Path to the Chrome binary (otherwise auto-detected)
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// Named persistent Chrome profile under ~/.logoscout/profiles
        #[arg(long)]
        profile: Option<String>,

        /// Directory for failure screenshots and page snapshots
        #[arg(long, default_value = ".")]
        diagnostics_dir: PathBuf,
    },

    /// Show the site name each URL would be searched under
    SiteName {
        /// Website URLs to inspect
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:
    bash, zsh, fish, powershell, elvish

INSTALLATION:
    bash:  logoscout completion --shell bash >> ~/.bashrc
    zsh:   logoscout completion --shell zsh >> ~/.zshrc
    fish:  logoscout completion --shell fish > ~/.config/fish/completions/logoscout.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Run {
            input,
            urls,
            output,
            strategy,
            suffix,
            chrome_path,
            profile,
            diagnostics_dir,
        } => commands::run::execute(RunArgs {
            input,
            urls,
            output,
            strategy,
            suffix,
            chrome_path,
            profile,
            diagnostics_dir,
        }),
        Commands::SiteName { urls } => commands::site_name::execute(&urls),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            commands::completion::execute(shell, &mut cmd)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("logoscout=debug,logoscout_core=debug,logoscout_browser=debug,logoscout_scrape=debug")
    } else {
        EnvFilter::new("logoscout=info,logoscout_scrape=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
