use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use std::path::PathBuf;

/// Captures what the operator was looking at when a stage failed: a full-page
/// screenshot and an HTML snapshot, named after the failing stage and the
/// site being processed. Capture is best-effort; a diagnostics failure never
/// escalates past a log line.
pub struct Diagnostics {
    dir: PathBuf,
}

impl Diagnostics {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn capture(&self, page: &Page, stage: &str, site_name: &str) {
        let (screenshot, snapshot) = artifact_names(stage, site_name);

        let screenshot_path = self.dir.join(screenshot);
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();
        match page.save_screenshot(params, &screenshot_path).await {
            Ok(_) => tracing::info!("Saved failure screenshot: {}", screenshot_path.display()),
            Err(e) => tracing::warn!("Could not save failure screenshot: {}", e),
        }

        let snapshot_path = self.dir.join(snapshot);
        match page.content().await {
            Ok(html) => {
                if let Err(e) = std::fs::write(&snapshot_path, html) {
                    tracing::warn!("Could not write page snapshot: {}", e);
                } else {
                    tracing::info!("Saved page snapshot: {}", snapshot_path.display());
                }
            }
            Err(e) => tracing::warn!("Could not read page source: {}", e),
        }
    }
}

/// File names for the two artifacts of one failure. Site names come from
/// URLs, so anything path-hostile is flattened to underscores.
pub fn artifact_names(stage: &str, site_name: &str) -> (String, String) {
    let site = sanitize(site_name);
    let stage = sanitize(stage);
    (
        format!("error_{}_{}.png", stage, site),
        format!("page_source_{}_{}.html", stage, site),
    )
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names_embed_stage_and_site() {
        let (png, html) = artifact_names("detail_panel", "acme");
        assert_eq!(png, "error_detail_panel_acme.png");
        assert_eq!(html, "page_source_detail_panel_acme.html");
    }

    #[test]
    fn test_artifact_names_flatten_hostile_characters() {
        let (png, html) = artifact_names("extract", "../evil site");
        assert_eq!(png, "error_extract____evil_site.png");
        assert_eq!(html, "page_source_extract____evil_site.html");
    }
}
