mod chrome;
mod diagnostics;
mod error;
mod profile;
mod session;

pub use chrome::{find_chrome, ChromeLauncher};
pub use diagnostics::{artifact_names, Diagnostics};
pub use error::{Error, Result};
pub use profile::Profile;
pub use session::BrowserSession;
