use anyhow::Result;
use logoscout_core::extract_site_name;

/// Show the site name each URL would be searched under, without touching a
/// browser. Handy for sanity-checking an input list before a run.
pub fn execute(urls: &[String]) -> Result<()> {
    for url in urls {
        match extract_site_name(url) {
            Some(name) => println!("{} -> {}", url, name),
            None => println!("{} -> (no site name)", url),
        }
    }
    Ok(())
}
