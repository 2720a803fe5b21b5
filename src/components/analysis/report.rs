//! Downloadable JSON report of an analysis run.

use serde::Serialize;

use super::types::{ASSUMED_FPS, AnalysisResult, IncidentKind};

/// Product name written into report metadata.
pub const PLATFORM: &str = "kornerFlag VAR Analysis";
/// Report format version.
pub const REPORT_VERSION: &str = "2.0";

/// Top-level report document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
	/// Generation time and producer.
	pub metadata: ReportMetadata,
	/// Properties of the analysed video.
	pub video: VideoSection,
	/// Detected incidents.
	pub analysis: AnalysisSection,
}

/// Who produced the report, and when.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportMetadata {
	/// ISO-8601 creation time.
	pub generated: String,
	/// Always [`PLATFORM`].
	pub platform: String,
	/// Always [`REPORT_VERSION`].
	pub version: String,
}

/// Video properties as shown in the demo.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VideoSection {
	/// `WIDTHxHEIGHT`.
	pub resolution: String,
	/// Seconds.
	pub duration: f64,
	/// Frame count at the assumed frame rate.
	pub frames: u64,
	/// Always [`ASSUMED_FPS`].
	pub fps: u32,
}

/// Incident list with its length.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSection {
	/// Number of entries in `incidents`.
	pub total_incidents: usize,
	/// Incidents in timestamp order.
	pub incidents: Vec<IncidentRecord>,
}

/// Flattened incident: declaration fields are inlined and `null` when absent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncidentRecord {
	/// Serialized as `"type"`.
	#[serde(rename = "type")]
	pub kind: IncidentKind,
	/// Seconds from the start of the video.
	pub timestamp: f64,
	/// Detection confidence in `[0, 1]`.
	pub confidence: f64,
	/// What was detected.
	pub description: String,
	/// Referee-style decision, if one was made.
	pub decision: Option<String>,
	/// Reasoning behind `decision`.
	pub summary: Option<String>,
}

impl Report {
	/// Assembles the report for `result`, stamped with `generated`.
	pub fn build(result: &AnalysisResult, generated: &str) -> Self {
		let incidents: Vec<IncidentRecord> = result
			.incidents
			.iter()
			.map(|inc| IncidentRecord {
				kind: inc.kind,
				timestamp: inc.timestamp,
				confidence: inc.confidence,
				description: inc.description.to_string(),
				decision: inc.declaration.as_ref().map(|d| d.decision.to_string()),
				summary: inc.declaration.as_ref().map(|d| d.summary.to_string()),
			})
			.collect();

		Self {
			metadata: ReportMetadata {
				generated: generated.to_string(),
				platform: PLATFORM.to_string(),
				version: REPORT_VERSION.to_string(),
			},
			video: VideoSection {
				resolution: result.video.resolution(),
				duration: result.video.duration,
				frames: result.video.frames,
				fps: ASSUMED_FPS,
			},
			analysis: AnalysisSection {
				total_incidents: incidents.len(),
				incidents,
			},
		}
	}

	/// Pretty-printed JSON with two-space indentation.
	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string_pretty(self)
	}
}

/// `2026-10-18T09:30:05.123Z` becomes `kornerflag_var_report_20261018T093005.json`.
pub fn export_filename(generated: &str) -> String {
	let stamp: String = generated
		.chars()
		.take(19)
		.filter(|c| *c != ':' && *c != '-')
		.collect();
	format!("kornerflag_var_report_{}.json", stamp)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::analysis::incidents::analyze;
	use crate::components::analysis::types::{Incident, VideoInfo};
	use serde_json::Value;

	#[test]
	fn report_json_has_expected_shape() {
		let result = analyze(VideoInfo::new(1920, 1080, 100.0));
		let json = Report::build(&result, "2026-10-18T09:30:05.123Z")
			.to_json()
			.unwrap();
		let value: Value = serde_json::from_str(&json).unwrap();

		assert_eq!(value["metadata"]["platform"], PLATFORM);
		assert_eq!(value["metadata"]["version"], "2.0");
		assert_eq!(value["metadata"]["generated"], "2026-10-18T09:30:05.123Z");
		assert_eq!(value["video"]["resolution"], "1920x1080");
		assert_eq!(value["video"]["frames"], 3000);
		assert_eq!(value["video"]["fps"], 30);
		assert_eq!(value["analysis"]["totalIncidents"], 3);

		let first = &value["analysis"]["incidents"][0];
		assert_eq!(first["type"], "offside");
		assert_eq!(first["confidence"], 0.91);
		assert_eq!(first["decision"], "Offside - Goal Disallowed");
		assert!(json.contains("\n  \"metadata\""));
	}

	#[test]
	fn missing_declaration_serializes_as_null() {
		let result = AnalysisResult {
			video: VideoInfo::new(640, 360, 10.0),
			incidents: vec![Incident {
				kind: IncidentKind::Foul,
				timestamp: 4.2,
				confidence: 0.5,
				description: "Contact",
				declaration: None,
			}],
		};
		let value: Value =
			serde_json::from_str(&Report::build(&result, "t").to_json().unwrap()).unwrap();
		let record = &value["analysis"]["incidents"][0];
		assert!(record["decision"].is_null());
		assert!(record["summary"].is_null());
	}

	#[test]
	fn filename_strips_separators_from_timestamp() {
		assert_eq!(
			export_filename("2026-10-18T09:30:05.123Z"),
			"kornerflag_var_report_20261018T093005.json"
		);
	}
}
