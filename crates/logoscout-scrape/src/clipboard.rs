use arboard::Clipboard;
use logoscout_core::poll::poll_until;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard access failed: {0}")]
    AccessFailed(String),
}

/// Where the copy-link flow's output is read from. The system clipboard in
/// production; tests script the reads.
pub trait ClipboardSource: Send {
    /// Current clipboard text, if any.
    fn read_text(&mut self) -> Option<String>;
}

pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let clipboard = Clipboard::new().map_err(|e| ClipboardError::AccessFailed(e.to_string()))?;
        Ok(Self { clipboard })
    }
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Option<String> {
        self.clipboard.get_text().ok()
    }
}

/// Keep only clipboard contents that can be a copied image URL.
pub(crate) fn usable_url(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty() && t.starts_with("http"))
}

/// Poll the clipboard a bounded number of times for a usable URL, pausing
/// between attempts.
///
/// `arm` runs before every read and re-triggers whatever feeds the clipboard
/// (the copy-link click plus its settle delay); an injected click can be
/// swallowed by the page, so every attempt gets a fresh one. `arm` returning
/// false fails that attempt. Exhaustion means the extraction has failed.
pub(crate) async fn poll_for_url<R>(
    source: &mut dyn ClipboardSource,
    attempts: usize,
    pause: Duration,
    mut arm: R,
) -> Option<String>
where
    R: AsyncFnMut(usize) -> bool,
{
    poll_until(attempts, pause, async |n| {
        if !arm(n).await {
            return None;
        }
        let text = source.read_text();
        debug!("Clipboard attempt {}: {:?}", n, text);
        usable_url(text)
    })
    .await
}
