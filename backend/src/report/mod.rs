//! Plain-text rendering of channel and comparison reports.

pub mod text;

pub use text::{format_count, format_rounded, key_findings, render_channel_report, render_comparison_report};
