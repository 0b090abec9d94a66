//! End-to-end batch flow with a scripted fetcher: input URLs in, a
//! `logo_urls.csv` on disk out.

use async_trait::async_trait;
use logoscout_core::record::write_csv;
use logoscout_scrape::{run_batch, LogoFetcher};

struct SingleAnswer {
    logo_url: &'static str,
}

#[async_trait(?Send)]
impl LogoFetcher for SingleAnswer {
    async fn fetch_logo(&mut self, _site_name: &str) -> Option<String> {
        Some(self.logo_url.to_string())
    }
}

#[tokio::test]
async fn test_batch_results_round_trip_to_csv() {
    let urls = vec!["https://www.acme.ae".to_string()];
    let mut fetcher = SingleAnswer {
        logo_url: "http://cdn/acme-logo.png",
    };

    let records = run_batch(&urls, &mut fetcher, 0.0..=0.0).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo_urls.csv");
    write_csv(&records, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("Website,Logo_URL"));
    assert_eq!(
        lines.next(),
        Some("https://www.acme.ae,http://cdn/acme-logo.png")
    );
    assert_eq!(lines.next(), None);
}
