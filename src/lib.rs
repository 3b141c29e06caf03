pub mod alert;
pub mod analysis;
pub mod cities;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod report;
pub mod verify;
