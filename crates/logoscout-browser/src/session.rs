use crate::{Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Registered on every new document so the page cannot trivially detect the
/// automation session; Google hides the normal results UI from pages where
/// `navigator.webdriver` reports true.
const STEALTH_INIT_SCRIPT: &str = r#"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => false
    });
"#;

const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One CDP connection to the already-launched Chrome process, holding the
/// single page the whole batch drives. The session is exclusively owned by
/// one input's orchestration at a time; there is no concurrent page access.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl BrowserSession {
    /// Attach to Chrome on the given debugging port.
    ///
    /// Chrome may not be ready right after spawn, so the connection is
    /// retried a few times before giving up.
    pub async fn connect(debugging_port: u16) -> Result<Self> {
        let ws_url = format!("http://localhost:{}", debugging_port);
        tracing::info!("Connecting to Chrome on port {}", debugging_port);

        let (browser, mut handler) = {
            let mut retries = 5;
            loop {
                tracing::debug!("Attempting CDP connection to {}...", ws_url);
                match Browser::connect(&ws_url).await {
                    Ok(result) => {
                        tracing::info!("CDP connection established");
                        break result;
                    }
                    Err(e) => {
                        retries -= 1;
                        if retries == 0 {
                            return Err(Error::Cdp(format!(
                                "Failed to connect to Chrome after 5 attempts: {}",
                                e
                            )));
                        }
                        tracing::info!(
                            "CDP connection attempt failed, retrying... ({} left)",
                            retries
                        );
                        tokio::time::sleep(Duration::from_millis(500)).await;
                    }
                }
            }
        };

        // The handler task must run for any page command to complete. Newer
        // Chrome versions emit CDP messages chromiumoxide cannot parse; those
        // are noise, not connection failures.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    let msg = e.to_string();
                    if msg.contains("connection closed")
                        || msg.contains("websocket closed")
                        || msg.contains("io error")
                    {
                        tracing::warn!("CDP connection error, stopping handler: {}", e);
                        break;
                    }
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
            tracing::debug!("CDP handler task completed");
        });

        // Give Chrome a moment to create its initial page.
        tokio::time::sleep(Duration::from_millis(500)).await;

        let page = if let Some(page) = browser.pages().await?.first() {
            tracing::debug!("Using existing page");
            page.clone()
        } else {
            tracing::debug!("No existing pages, creating new page");
            browser.new_page("about:blank").await?
        };

        let stealth = AddScriptToEvaluateOnNewDocumentParams::builder()
            .source(STEALTH_INIT_SCRIPT)
            .build()
            .map_err(Error::Cdp)?;
        page.execute(stealth).await?;

        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate the shared page.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    /// The page's current URL, as the browser reports it.
    pub async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await?
            .ok_or_else(|| Error::Browser("page has no URL".to_string()))
    }

    /// Whether an element matching the CSS selector currently exists. Used
    /// for presence probes (e.g. the CAPTCHA indicator), not for waits.
    pub async fn element_exists(&self, selector: &str) -> bool {
        self.page.find_element(selector).await.is_ok()
    }

    /// Wait for an element matching the CSS selector, polling until the
    /// bounded timeout elapses.
    pub async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<Element> {
        self.wait_for(selector, timeout, |s| self.page.find_element(s))
            .await
    }

    /// Wait for an element matching the XPath expression.
    pub async fn wait_for_xpath(&self, xpath: &str, timeout: Duration) -> Result<Element> {
        self.wait_for(xpath, timeout, |x| self.page.find_xpath(x)).await
    }

    async fn wait_for<'a, F, Fut>(
        &'a self,
        locator: &'a str,
        timeout: Duration,
        mut find: F,
    ) -> Result<Element>
    where
        F: FnMut(&'a str) -> Fut,
        Fut: Future<Output = chromiumoxide::error::Result<Element>>,
    {
        let deadline = Instant::now() + timeout;
        loop {
            match find(locator).await {
                Ok(element) => return Ok(element),
                Err(e) => {
                    if Instant::now() >= deadline {
                        tracing::debug!("Element wait expired for {}: {}", locator, e);
                        return Err(Error::Timeout {
                            what: locator.to_string(),
                            timeout,
                        });
                    }
                    tokio::time::sleep(ELEMENT_POLL_INTERVAL).await;
                }
            }
        }
    }

    /// Close the browser connection and stop the handler task. Safe to call
    /// whether or not Chrome itself is still running.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Browser close error (ignored): {}", e);
        }
        self.handler_task.abort();
    }
}

// Note: session behavior requires a running Chrome instance. The pure pieces
// (site names, polling, batch sequencing, locator data) are unit tested in
// logoscout-core and logoscout-scrape.
