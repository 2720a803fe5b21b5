//! Error types for DOM access, uploads, and report export.

use thiserror::Error;

/// Failures while acquiring browser objects the page depends on.
#[derive(Debug, Error)]
pub enum DomError {
	/// `window` is not available (not running in a browser).
	#[error("no global window")]
	NoWindow,
	/// `window.document` is not available.
	#[error("no document on window")]
	NoDocument,
	/// The canvas refused to hand out a 2D rendering context.
	#[error("canvas has no 2d rendering context")]
	NoContext2d,
	/// A browser call failed; carries the debug form of the thrown value.
	#[error("{what} failed: {detail}")]
	Js {
		/// Which operation failed.
		what: &'static str,
		/// Debug rendering of the thrown JS value.
		detail: String,
	},
}

impl DomError {
	/// Wraps a thrown `JsValue` with the name of the operation that threw it.
	pub fn js(what: &'static str, value: wasm_bindgen::JsValue) -> Self {
		Self::Js {
			what,
			detail: format!("{:?}", value),
		}
	}
}

/// Rejections of a dropped or picked file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
	/// The declared media type is not `video/*`.
	#[error("Please upload a video file")]
	NotVideo {
		/// The declared media type, possibly empty.
		media_type: String,
	},
}

/// Failures while producing the downloadable report.
#[derive(Debug, Error)]
pub enum ExportError {
	/// Export was requested before any analysis finished.
	#[error("no analysis results to export")]
	NothingToExport,
	/// The report could not be serialized.
	#[error("failed to serialize report: {0}")]
	Serialize(#[from] serde_json::Error),
	/// Building the download in the browser failed.
	#[error(transparent)]
	Dom(#[from] DomError),
}
