//! Loading exported video records.
//!
//! Exports are the CSV or JSON files written by the metadata fetcher. The
//! loaders detect the format from the file extension, attach error context,
//! and produce plain [`VideoRecord`](crate::models::VideoRecord) lists ready for
//! [`ChannelSeries::new`](crate::models::ChannelSeries::new).
//!
//! # Example
//!
//! ```no_run
//! use channel_growth::io::RecordLoader;
//! use std::path::Path;
//!
//! let result = RecordLoader::load_from_file(Path::new("videos.csv"))
//!     .expect("Failed to load");
//! println!("Loaded {} videos", result.num_records);
//! ```

pub mod loaders;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{RecordLoadResult, RecordLoader, RecordSourceType};
