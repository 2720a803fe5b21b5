//! Simulated VAR analysis demo.
//!
//! A visitor uploads a match clip, watches a timed progress bar walk through
//! the pipeline stages, and gets three templated incidents with referee-style
//! decisions. Results can be downloaded as a JSON report. No video content is
//! inspected; only the browser-reported dimensions and duration are used.

mod component;
pub mod format;
pub mod incidents;
pub mod progress;
pub mod report;
pub mod types;

pub use component::AnalysisDemo;
pub use incidents::{analyze, simulate_incidents};
pub use progress::{ProgressTracker, STAGES};
pub use report::{Report, export_filename};
pub use types::{
	ASSUMED_FPS, AnalysisResult, Declaration, Incident, IncidentKind, VideoInfo,
	validate_media_type,
};
