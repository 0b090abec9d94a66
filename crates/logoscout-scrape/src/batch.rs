use async_trait::async_trait;
use logoscout_core::{extract_site_name, ResultRecord};
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::{error, info};

/// One logo lookup for one site. The orchestrator is the production
/// implementation; batch tests substitute scripted fetchers.
#[async_trait(?Send)]
pub trait LogoFetcher {
    /// The logo image URL for the site, or `None` if the lookup failed.
    async fn fetch_logo(&mut self, site_name: &str) -> Option<String>;
}

/// Process every input URL in order and collect one record per input.
///
/// A failed site-name extraction or a failed lookup produces a record with an
/// empty logo column and the batch moves on; a single bad input never aborts
/// the run. A uniform pause drawn from `pause` separates consecutive lookups.
pub async fn run_batch<F>(
    urls: &[String],
    fetcher: &mut F,
    pause: RangeInclusive<f64>,
) -> Vec<ResultRecord>
where
    F: LogoFetcher,
{
    let mut records = Vec::with_capacity(urls.len());
    for url in urls {
        info!("Processing {}", url);

        let Some(site_name) = extract_site_name(url) else {
            error!("Could not extract a site name from {}", url);
            records.push(ResultRecord::missing(url.clone()));
            continue;
        };

        let logo_url = fetcher.fetch_logo(&site_name).await;
        match &logo_url {
            Some(found) => info!("Logo URL for {}: {}", site_name, found),
            None => info!("No logo URL found for {}", site_name),
        }
        records.push(ResultRecord::new(url.clone(), logo_url));

        pause_between_inputs(&pause).await;
    }
    records
}

async fn pause_between_inputs(range: &RangeInclusive<f64>) {
    let secs = rand::thread_rng().gen_range(range.clone());
    if secs > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    }
}
