pub mod batch;
pub mod clipboard;
pub mod config;
pub mod locators;
pub mod operator;
pub mod orchestrator;

pub use batch::{run_batch, LogoFetcher};
pub use clipboard::{ClipboardError, ClipboardSource, SystemClipboard};
pub use config::{ExtractionStrategy, ScrapeConfig};
pub use locators::Locators;
pub use operator::{OperatorPrompt, TerminalPrompt};
pub use orchestrator::{Orchestrator, Stage, StageError};
