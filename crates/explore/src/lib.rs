//! BizPub Exploration Engine
//!
//! Pure computations over the article dataset, callable from any front end:
//! - Page-range parsing into article lengths
//! - Length histograms and summary statistics
//! - Per-journal and per-year mean lengths
//! - Co-authorship graph, ego networks and spring layout
//! - Mode dispatch and markdown summaries

pub mod aggregate;
pub mod coauthor;
pub mod distribution;
pub mod mode;
pub mod pages;
mod summary;

pub use mode::{explore, Exploration, ExploreMode, ExploreOptions, ExploreRequest, LengthReport, YearlyReport};
pub use coauthor::{CoauthorGraph, NetworkReport};
pub use pages::page_length;
