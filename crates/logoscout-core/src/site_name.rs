use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCHEME: Regex = Regex::new(r"^https?://").unwrap();
    static ref FIRST_LABEL: Regex = Regex::new(r"^([^.]+)\.").unwrap();
}

/// Derive the site name from a website URL: the first dot-delimited label of
/// the domain, after stripping an optional `http://`/`https://` scheme and an
/// optional leading `www.` prefix.
///
/// Returns `None` when no dot follows the stripped prefix, e.g. for
/// `https://localhost`.
pub fn extract_site_name(url: &str) -> Option<String> {
    let rest = SCHEME.replace(url, "");
    let rest = rest.strip_prefix("www.").unwrap_or(rest.as_ref());

    FIRST_LABEL
        .captures(rest)
        .map(|caps| caps[1].to_string())
}
