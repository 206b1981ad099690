pub mod classify;
pub mod clean;
pub mod error;
pub mod features;
pub mod output;
pub mod reader;
pub mod record;
pub mod stats;
