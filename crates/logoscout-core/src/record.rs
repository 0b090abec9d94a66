use crate::Result;
use csv::Writer;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// One output row: the original input URL paired with the resolved logo URL,
/// or `None` when any step failed for that input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub website: String,
    pub logo_url: Option<String>,
}

impl ResultRecord {
    pub fn new(website: impl Into<String>, logo_url: Option<String>) -> Self {
        Self {
            website: website.into(),
            logo_url,
        }
    }

    /// A record for an input whose processing failed at some stage.
    pub fn missing(website: impl Into<String>) -> Self {
        Self::new(website, None)
    }
}

/// Write the result table as CSV in input order. The `Logo_URL` field is
/// empty for records without a resolved URL.
pub fn write_csv(records: &[ResultRecord], output_path: &Path) -> Result<()> {
    debug!(
        "Exporting {} records to CSV: {}",
        records.len(),
        output_path.display()
    );

    let file = File::create(output_path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(["Website", "Logo_URL"])?;

    for record in records {
        wtr.write_record([
            record.website.as_str(),
            record.logo_url.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    info!(
        "Wrote {} records to {}",
        records.len(),
        output_path.display()
    );

    Ok(())
}
