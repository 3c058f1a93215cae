//! Headache Insights - On-device pattern analysis for headache diaries
//!
//! Turns a history of headache episodes into aggregate statistics, co-occurrence
//! rankings and heuristic weather/sleep/medication signals, and evaluates the
//! safety signals (red-flag urgency tier, medication overuse) that must work
//! even with very little data.
//!
//! Every computation is a pure function of the episode snapshot, the
//! configuration and a single host-supplied reference time.
//!
//! ## Modules
//!
//! - **Analyzers**: `aggregator`, `triggers`, `temporal`, `weather`, `sleep`, `medication`
//! - **Safety**: `red_flag`, `medication::medication_overuse`
//! - **Assembly**: `report`, `export`, `pipeline`

pub mod aggregator;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod medication;
pub mod pipeline;
pub mod red_flag;
pub mod report;
pub mod sleep;
pub mod temporal;
pub mod triggers;
pub mod types;
pub mod weather;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use clock::ReferenceTime;
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use ingest::EpisodeAdapter;
pub use pipeline::{episodes_to_export_json, episodes_to_report_json, InsightsEngine};
pub use report::ReportBuilder;
pub use types::{Episode, OveruseStatus, RedFlagAssessment, Report, Severity, UrgencyTier};

/// Engine version embedded in exported documents
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for exported documents
pub const PRODUCER_NAME: &str = "headache-insights";
