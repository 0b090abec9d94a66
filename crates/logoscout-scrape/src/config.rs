use crate::Locators;
use std::ops::RangeInclusive;
use std::time::Duration;

/// How the logo URL is pulled out of the preview panel once the operator has
/// selected an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Drive the panel's Share > copy-link flow and read the OS clipboard.
    Clipboard,
    /// Read the preview `<img>`'s src attribute straight out of the DOM.
    DomRead,
}

/// Tuning for one orchestrated scrape. The defaults target Google Images:
/// `"<site> logo"` queries, 15 s element waits, a three-attempt clipboard
/// poll.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Search engine home page loaded at the start of every input.
    pub search_home: String,
    /// Literal appended to the site name to form the query.
    pub query_suffix: String,
    pub strategy: ExtractionStrategy,
    /// Bounded wait for page-level elements (search box, preview panel).
    pub element_timeout: Duration,
    /// Bounded wait for menu elements inside the preview panel.
    pub menu_timeout: Duration,
    /// Uniform pause (seconds) between typing the query and submitting it,
    /// emulating human cadence.
    pub typing_pause: RangeInclusive<f64>,
    /// Uniform pause (seconds) before clicking the images tab.
    pub tab_pause: RangeInclusive<f64>,
    /// Clipboard poll: attempt count, pause between attempts, and the settle
    /// delay after the copy-link click before the first read.
    pub clipboard_attempts: usize,
    pub clipboard_pause: Duration,
    pub clipboard_settle: Duration,
    pub locators: Locators,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            search_home: "https://www.google.com".to_string(),
            query_suffix: "logo".to_string(),
            strategy: ExtractionStrategy::Clipboard,
            element_timeout: Duration::from_secs(15),
            menu_timeout: Duration::from_secs(10),
            typing_pause: 0.5..=1.5,
            tab_pause: 0.3..=1.0,
            clipboard_attempts: 3,
            clipboard_pause: Duration::from_secs(1),
            clipboard_settle: Duration::from_secs(2),
            locators: Locators::default(),
        }
    }
}

impl ScrapeConfig {
    /// The query submitted for a site, e.g. `acme logo Dubai` for suffix
    /// `logo Dubai`.
    pub fn query_for(&self, site_name: &str) -> String {
        format!("{} {}", site_name, self.query_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_combines_site_and_suffix() {
        let config = ScrapeConfig::default();
        assert_eq!(config.query_for("acme"), "acme logo");

        let config = ScrapeConfig {
            query_suffix: "logo Dubai".to_string(),
            ..ScrapeConfig::default()
        };
        assert_eq!(config.query_for("acme"), "acme logo Dubai");
    }

    #[test]
    fn test_defaults_target_google_images() {
        let config = ScrapeConfig::default();
        assert_eq!(config.search_home, "https://www.google.com");
        assert_eq!(config.strategy, ExtractionStrategy::Clipboard);
        assert_eq!(config.element_timeout, Duration::from_secs(15));
        assert_eq!(config.clipboard_attempts, 3);
        assert_eq!(config.typing_pause, 0.5..=1.5);
        assert_eq!(config.tab_pause, 0.3..=1.0);
    }
}
