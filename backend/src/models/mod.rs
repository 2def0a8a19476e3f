//! Domain models for channel analytics.
//!
//! [`VideoRecord`] is one fetched video; [`ChannelSeries`] is a channel's
//! validated, publish-ordered list of records. Everything else in the crate
//! is derived from a `ChannelSeries`.

pub mod series;
pub mod time;
pub mod video;


pub use series::*;
pub use time::*;
pub use video::*;
