pub mod error;
pub mod poll;
pub mod record;
pub mod site_name;

pub use error::{Error, Result};
pub use record::{write_csv, ResultRecord};
pub use site_name::extract_site_name;
