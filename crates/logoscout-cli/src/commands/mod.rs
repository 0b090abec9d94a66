pub mod completion;
pub mod run;
pub mod site_name;
