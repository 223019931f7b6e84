pub mod cli;
pub mod config;
pub mod measure;
pub mod record;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod summary;
