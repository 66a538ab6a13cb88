//! tzsleuth - timezone inference from daily activity rhythm
//!
//! This library estimates where in the world the author of a set of
//! UTC-timestamped events probably lives. The quietest contiguous hours of
//! their aggregate day are assumed to be night, and the offset between that
//! window's midpoint and 04:00 local time gives a UTC offset and a coarse
//! region guess.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod estimator;
pub mod histogram;
pub mod html_output;
pub mod ingest;
pub mod json_output;
pub mod output_dir;
pub mod region;
pub mod stats;
pub mod text_report;
