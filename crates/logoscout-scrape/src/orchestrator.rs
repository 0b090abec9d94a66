use crate::batch::LogoFetcher;
use crate::clipboard::{poll_for_url, ClipboardSource};
use crate::{ExtractionStrategy, OperatorPrompt, ScrapeConfig};
use async_trait::async_trait;
use chromiumoxide::Element;
use logoscout_browser::{BrowserSession, Diagnostics};
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

/// The stage sequence for one input. Failures carry the stage so logs and
/// diagnostic artifacts can say where things went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Home,
    Captcha,
    Query,
    ImagesTab,
    Selection,
    DetailPanel,
    Extract,
}

impl Stage {
    pub fn slug(self) -> &'static str {
        match self {
            Stage::Home => "home",
            Stage::Captcha => "captcha",
            Stage::Query => "query",
            Stage::ImagesTab => "images_tab",
            Stage::Selection => "selection",
            Stage::DetailPanel => "detail_panel",
            Stage::Extract => "extract",
        }
    }
}

#[derive(Debug, Error)]
#[error("{} stage failed: {reason}", .stage.slug())]
pub struct StageError {
    pub stage: Stage,
    pub reason: String,
}

fn fail(stage: Stage, reason: impl ToString) -> StageError {
    StageError {
        stage,
        reason: reason.to_string(),
    }
}

/// JS read of the preview image source, dispatched against the panel's
/// image container.
const READ_IMG_SRC: &str = r#"function() {
    const img = this.querySelector('img');
    return img && img.src ? img.src : null;
}"#;

/// Drives one browser session through search, the two human checkpoints, and
/// extraction, for one site at a time. The session is borrowed for the whole
/// batch; no other code touches the page while an input is in flight.
pub struct Orchestrator<'s> {
    session: &'s BrowserSession,
    config: ScrapeConfig,
    operator: Box<dyn OperatorPrompt>,
    clipboard: Option<Box<dyn ClipboardSource>>,
    diagnostics: Diagnostics,
}

impl<'s> Orchestrator<'s> {
    pub fn new(
        session: &'s BrowserSession,
        config: ScrapeConfig,
        operator: Box<dyn OperatorPrompt>,
        clipboard: Option<Box<dyn ClipboardSource>>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            session,
            config,
            operator,
            clipboard,
            diagnostics,
        }
    }

    async fn run(&mut self, site_name: &str) -> Result<String, StageError> {
        let query = self.config.query_for(site_name);
        info!("Searching for: {}", query);

        self.session
            .goto(&self.config.search_home)
            .await
            .map_err(|e| fail(Stage::Home, e))?;

        self.clear_captcha(site_name).await?;
        self.submit_query(&query).await?;
        self.open_image_results().await?;

        info!("Waiting for the operator to select an image result");
        self.operator
            .acknowledge(&format!(
                "For {}: click an image in the browser to open its preview",
                site_name
            ))
            .await
            .map_err(|e| fail(Stage::Selection, e))?;

        self.session
            .wait_for_element(
                &self.config.locators.detail_panel,
                self.config.element_timeout,
            )
            .await
            .map_err(|e| fail(Stage::DetailPanel, e))?;
        info!("Preview panel detected");

        match self.config.strategy {
            ExtractionStrategy::Clipboard => self.extract_via_clipboard().await,
            ExtractionStrategy::DomRead => self.extract_via_dom().await,
        }
    }

    /// Cooperative CAPTCHA checkpoint: loops on the indicator element with no
    /// timeout, handing control to the operator each round.
    async fn clear_captcha(&self, site_name: &str) -> Result<(), StageError> {
        info!("Checking for reCAPTCHA...");
        while self
            .session
            .element_exists(&self.config.locators.captcha_indicator)
            .await
        {
            info!("reCAPTCHA detected; waiting on the operator");
            self.operator
                .acknowledge(&format!(
                    "reCAPTCHA detected while processing {}: solve it in the browser",
                    site_name
                ))
                .await
                .map_err(|e| fail(Stage::Captcha, e))?;
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        info!("reCAPTCHA solved or not present");
        Ok(())
    }

    async fn submit_query(&self, query: &str) -> Result<(), StageError> {
        let search_box = self
            .session
            .wait_for_element(&self.config.locators.search_box, self.config.element_timeout)
            .await
            .map_err(|e| fail(Stage::Query, e))?;

        js_clear(&search_box)
            .await
            .map_err(|e| fail(Stage::Query, e))?;
        search_box
            .click()
            .await
            .map_err(|e| fail(Stage::Query, e))?;
        search_box
            .type_str(query)
            .await
            .map_err(|e| fail(Stage::Query, e))?;

        // Emulate a human pausing between typing and submitting.
        let pause = rand::thread_rng().gen_range(self.config.typing_pause.clone());
        tokio::time::sleep(Duration::from_secs_f64(pause)).await;

        search_box
            .press_key("Enter")
            .await
            .map_err(|e| fail(Stage::Query, e))?;
        Ok(())
    }

    /// Switch to image results: prefer clicking the tab control, fall back to
    /// rewriting the results URL with the image-search mode parameter.
    async fn open_image_results(&self) -> Result<(), StageError> {
        match self
            .session
            .wait_for_xpath(&self.config.locators.images_tab, self.config.element_timeout)
            .await
        {
            Ok(tab) => match humanized_click(&tab, &self.config.tab_pause).await {
                Ok(_) => {
                    info!("Switched to image results via tab click");
                    return Ok(());
                }
                Err(e) => warn!("Images tab click failed: {}. Rewriting URL instead", e),
            },
            Err(e) => warn!("Images tab not found: {}. Rewriting URL instead", e),
        }

        let current = self
            .session
            .current_url()
            .await
            .map_err(|e| fail(Stage::ImagesTab, e))?;
        let rewritten =
            with_image_search_mode(&current).map_err(|e| fail(Stage::ImagesTab, e))?;
        self.session
            .goto(&rewritten)
            .await
            .map_err(|e| fail(Stage::ImagesTab, e))?;
        info!("Switched to image results via URL");
        Ok(())
    }

    async fn extract_via_clipboard(&mut self) -> Result<String, StageError> {
        let loc = &self.config.locators;

        let overflow = self
            .session
            .wait_for_xpath(&loc.overflow_button, self.config.element_timeout)
            .await
            .map_err(|e| fail(Stage::Extract, e))?;
        info!("Overflow menu detected");
        overflow
            .click()
            .await
            .map_err(|e| fail(Stage::Extract, e))?;
        tokio::time::sleep(Duration::from_millis(500)).await;

        let share = self
            .session
            .wait_for_xpath(&loc.share_option, self.config.menu_timeout)
            .await
            .map_err(|e| fail(Stage::Extract, e))?;
        info!("Share option detected");
        share
            .click()
            .await
            .map_err(|e| fail(Stage::Extract, e))?;
        tokio::time::sleep(Duration::from_millis(500)).await;

        self.session
            .wait_for_element(&loc.share_popup, self.config.menu_timeout)
            .await
            .map_err(|e| fail(Stage::Extract, e))?;
        info!("Share popup detected");

        let copy_link = self
            .session
            .wait_for_xpath(&loc.copy_link, self.config.menu_timeout)
            .await
            .map_err(|e| fail(Stage::Extract, e))?;

        let source = self.clipboard.as_mut().ok_or_else(|| {
            fail(
                Stage::Extract,
                "clipboard strategy selected but no clipboard source available",
            )
        })?;

        // A plain input click is unreliable inside this popup; dispatch the
        // click from JS instead. The page can swallow an injected click, so
        // every poll attempt re-clicks and re-settles before reading.
        let copy_link = &copy_link;
        let settle = self.config.clipboard_settle;
        match poll_for_url(
            source.as_mut(),
            self.config.clipboard_attempts,
            self.config.clipboard_pause,
            async |n| {
                match js_click(copy_link).await {
                    Ok(()) => info!("Triggered copy-link via injected click (attempt {})", n),
                    Err(e) => {
                        warn!("Copy-link click failed on attempt {}: {}", n, e);
                        return false;
                    }
                }
                tokio::time::sleep(settle).await;
                true
            },
        )
        .await
        {
            Some(url) => {
                info!("Extracted logo URL from clipboard: {}", url);
                Ok(url)
            }
            None => Err(fail(
                Stage::Extract,
                format!(
                    "clipboard produced no http URL after {} attempts",
                    self.config.clipboard_attempts
                ),
            )),
        }
    }

    async fn extract_via_dom(&self) -> Result<String, StageError> {
        let container = self
            .session
            .wait_for_xpath(
                &self.config.locators.preview_image,
                self.config.element_timeout,
            )
            .await
            .map_err(|e| fail(Stage::Extract, e))?;
        info!("Preview image container detected");

        let returned = container
            .call_js_fn(READ_IMG_SRC, false)
            .await
            .map_err(|e| fail(Stage::Extract, e))?;
        let src = returned
            .result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .map(str::to_string);

        match src {
            Some(url) if url.starts_with("http") => {
                info!("Extracted logo URL from image element: {}", url);
                Ok(url)
            }
            other => Err(fail(
                Stage::Extract,
                format!("preview image yielded no usable src: {:?}", other),
            )),
        }
    }
}

#[async_trait(?Send)]
impl LogoFetcher for Orchestrator<'_> {
    async fn fetch_logo(&mut self, site_name: &str) -> Option<String> {
        match self.run(site_name).await {
            Ok(url) => Some(url),
            Err(e) => {
                error!("{} (site: {})", e, site_name);
                self.diagnostics
                    .capture(self.session.page(), e.stage.slug(), site_name)
                    .await;
                None
            }
        }
    }
}

/// Pause a human-looking beat, then click.
async fn humanized_click(
    element: &Element,
    pause: &RangeInclusive<f64>,
) -> chromiumoxide::error::Result<()> {
    let secs = rand::thread_rng().gen_range(pause.clone());
    tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    element.click().await?;
    Ok(())
}

async fn js_click(element: &Element) -> chromiumoxide::error::Result<()> {
    element
        .call_js_fn("function() { this.click(); }", false)
        .await?;
    Ok(())
}

async fn js_clear(element: &Element) -> chromiumoxide::error::Result<()> {
    element
        .call_js_fn("function() { this.value = ''; }", false)
        .await?;
    Ok(())
}

/// Rewrite a results URL so the page reloads in image-search mode, keeping
/// every other query parameter intact.
pub(crate) fn with_image_search_mode(current: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(current)?;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "tbm")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (k, v) in &pairs {
            query.append_pair(k, v);
        }
        query.append_pair("tbm", "isch");
    }

    Ok(String::from(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_search_mode_appends_parameter() {
        let rewritten =
            with_image_search_mode("https://www.google.com/search?q=acme+logo").unwrap();
        assert_eq!(
            rewritten,
            "https://www.google.com/search?q=acme+logo&tbm=isch"
        );
    }

    #[test]
    fn test_image_search_mode_replaces_existing_parameter() {
        let rewritten =
            with_image_search_mode("https://www.google.com/search?q=acme&tbm=vid&hl=en").unwrap();
        assert_eq!(
            rewritten,
            "https://www.google.com/search?q=acme&hl=en&tbm=isch"
        );
        assert_eq!(rewritten.matches("tbm=").count(), 1);
    }

    #[test]
    fn test_image_search_mode_rejects_garbage() {
        assert!(with_image_search_mode("not a url").is_err());
    }

    #[test]
    fn test_stage_slugs_name_the_failing_step() {
        assert_eq!(Stage::DetailPanel.slug(), "detail_panel");
        let err = fail(Stage::Extract, "clipboard empty");
        assert_eq!(err.to_string(), "extract stage failed: clipboard empty");
    }
}
