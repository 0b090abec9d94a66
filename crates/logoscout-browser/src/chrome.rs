use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Fixed desktop user agent presented to the search engine. Google serves a
/// different (and differently structured) results page to obvious automation
/// agents, which would invalidate every selector in the scrape layer.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Locate the Chrome binary: explicit override first, then the platform's
/// usual install locations. The operator has to see and click inside the
/// window, so only a real desktop Chrome/Chromium will do.
pub fn find_chrome(custom_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = custom_path {
        return validate_chrome_path(path);
    }

    for path in default_paths() {
        if let Ok(valid) = validate_chrome_path(&path) {
            return Ok(valid);
        }
    }

    Err(Error::Browser(format!(
        "Chrome not found. Checked: {}. Use --chrome-path to specify location.",
        default_paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )))
}

fn default_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    return vec![
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
    ];

    #[cfg(target_os = "linux")]
    return vec![
        PathBuf::from("/usr/bin/google-chrome"),
        PathBuf::from("/usr/bin/chromium"),
        PathBuf::from("/usr/bin/chromium-browser"),
    ];

    #[cfg(target_os = "windows")]
    return vec![
        PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return vec![];
}

fn validate_chrome_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::Browser(format!(
            "Chrome not found at: {}",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(path).map_err(Error::Io)?;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::Browser(format!(
                "Chrome binary not executable: {}",
                path.display()
            )));
        }
    }

    Ok(path.to_path_buf())
}

/// Spawns the visible Chrome process the whole run shares. The process is
/// launched headful with a remote debugging port; the session layer attaches
/// over CDP afterwards.
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    profile_path: PathBuf,
    initial_url: String,
    debugging_port: u16,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, profile_path: PathBuf, initial_url: String) -> Self {
        Self {
            chrome_path,
            profile_path,
            initial_url,
            debugging_port: 9222,
        }
    }

    /// Launch the Chrome process
    pub fn launch(&self) -> Result<Child> {
        let args = self.build_args();

        Command::new(&self.chrome_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))
    }

    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debugging_port),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-gpu".to_string(),
            "--window-size=1920,1080".to_string(),
            format!("--user-agent={}", USER_AGENT),
            format!("--user-data-dir={}", self.profile_path.display()),
        ];

        let url = if !self.initial_url.starts_with("http://")
            && !self.initial_url.starts_with("https://")
        {
            format!("https://{}", self.initial_url)
        } else {
            self.initial_url.clone()
        };
        args.push(url);

        args
    }

    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }
}
