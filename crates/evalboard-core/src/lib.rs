pub mod config;
pub mod errors;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod registry;
pub mod report;
pub mod series;
pub mod time;
