use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use logoscout_browser::{find_chrome, BrowserSession, ChromeLauncher, Diagnostics, Profile};
use logoscout_core::record::{write_csv, ResultRecord};
use logoscout_scrape::{
    run_batch, ClipboardSource, ExtractionStrategy, Orchestrator, ScrapeConfig, SystemClipboard,
    TerminalPrompt,
};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Uniform pause between consecutive inputs, in seconds.
const INTER_REQUEST_PAUSE: RangeInclusive<f64> = 1.0..=3.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Strategy {
    /// Drive the preview panel's Share > copy-link flow and read the clipboard
    Clipboard,
    /// Read the preview image's src attribute out of the DOM
    DomRead,
}

impl From<Strategy> for ExtractionStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Clipboard => ExtractionStrategy::Clipboard,
            Strategy::DomRead => ExtractionStrategy::DomRead,
        }
    }
}

pub struct RunArgs {
    pub input: Option<PathBuf>,
    pub urls: Vec<String>,
    pub output: PathBuf,
    pub strategy: Strategy,
    pub suffix: String,
    pub chrome_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub diagnostics_dir: PathBuf,
}

/// Kill a process by PID (cross-platform)
fn kill_process_by_pid(pid: u32) {
    #[cfg(unix)]
    {
        use std::process::Command;
        let _ = Command::new("kill").arg(pid.to_string()).output();
    }

    #[cfg(windows)]
    {
        use std::process::Command;
        let _ = Command::new("taskkill")
            .args(["/PID", &pid.to_string(), "/F"])
            .output();
    }
}

pub fn execute(args: RunArgs) -> Result<()> {
    let urls = collect_urls(&args)?;
    debug!("Collected {} input URL(s)", urls.len());
    if urls.is_empty() {
        return Err(anyhow!(
            "No input URLs. Provide --input FILE or one or more --url flags."
        ));
    }

    let config = ScrapeConfig {
        query_suffix: args.suffix.clone(),
        strategy: args.strategy.into(),
        ..ScrapeConfig::default()
    };

    // The clipboard handle is created up front so a missing clipboard backend
    // fails the run before Chrome is launched.
    let clipboard: Option<Box<dyn ClipboardSource>> = match config.strategy {
        ExtractionStrategy::Clipboard => Some(Box::new(
            SystemClipboard::new().context("Clipboard access is required for --strategy clipboard")?,
        )),
        ExtractionStrategy::DomRead => None,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        println!("🔍 Locating Chrome...");
        let chrome_binary = find_chrome(args.chrome_path.as_deref())?;
        println!("✅ Found Chrome at: {}", chrome_binary.display());

        let profile = if let Some(profile_name) = &args.profile {
            let profile_path = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?
                .join(".logoscout")
                .join("profiles")
                .join(profile_name);

            println!("📁 Using profile: {}", profile_path.display());
            Profile::persistent(profile_path)?
        } else {
            println!("📁 Using temporary profile");
            Profile::temporary()?
        };

        let launcher = ChromeLauncher::new(
            chrome_binary,
            profile.path().to_path_buf(),
            config.search_home.clone(),
        );

        println!("🚀 Launching Chrome...");
        let chrome_process = launcher.launch()?;
        let chrome_pid = chrome_process.id();
        println!("✅ Chrome started successfully");

        let session = match BrowserSession::connect(launcher.debugging_port()).await {
            Ok(session) => session,
            Err(e) => {
                kill_process_by_pid(chrome_pid);
                return Err(e.into());
            }
        };

        println!("📋 Processing {} website(s)...", urls.len());
        let records = {
            let mut orchestrator = Orchestrator::new(
                &session,
                config,
                Box::new(TerminalPrompt),
                clipboard,
                Diagnostics::new(&args.diagnostics_dir),
            );
            run_batch(&urls, &mut orchestrator, INTER_REQUEST_PAUSE).await
        };

        // Chrome goes away whatever happened above; the records are already
        // collected in memory.
        session.close().await;
        kill_process_by_pid(chrome_pid);

        write_results(&records, &args.output)?;
        Ok(())
    });

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}

fn write_results(records: &[ResultRecord], output: &Path) -> Result<()> {
    write_csv(records, output)
        .with_context(|| format!("Failed to write results to {}", output.display()))?;

    let found = records.iter().filter(|r| r.logo_url.is_some()).count();
    println!(
        "✅ Wrote {} record(s) ({} with a logo URL) to {}",
        records.len(),
        found,
        output.display()
    );
    Ok(())
}

/// Inputs from the --input file (one URL per line, '#' comments and blank
/// lines skipped) followed by any --url flags, in order.
fn collect_urls(args: &RunArgs) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    if let Some(path) = &args.input {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        urls.extend(parse_input_list(&contents));
    }
    urls.extend(args.urls.iter().cloned());
    Ok(urls)
}

fn parse_input_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
