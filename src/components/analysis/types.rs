//! Data structures for the analysis demo.

use serde::Serialize;

use crate::error::UploadError;

/// Frame rate the demo assumes for every video.
pub const ASSUMED_FPS: u32 = 30;

/// Metadata of the uploaded video, as reported by the browser's decoder.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoInfo {
	/// Pixel width of the video track.
	pub width: u32,
	/// Pixel height of the video track.
	pub height: u32,
	/// Duration in seconds.
	pub duration: f64,
	/// Synthetic frame count: `floor(duration * 30)`.
	pub frames: u64,
}

impl VideoInfo {
	/// Metadata for a video; frames are derived from `duration`.
	pub fn new(width: u32, height: u32, duration: f64) -> Self {
		let frames = if duration.is_finite() && duration > 0.0 {
			(duration * ASSUMED_FPS as f64).floor() as u64
		} else {
			0
		};
		Self {
			width,
			height,
			duration,
			frames,
		}
	}

	/// `"1920x1080"`.
	pub fn resolution(&self) -> String {
		format!("{}x{}", self.width, self.height)
	}
}

/// Accepts only files whose declared media type is `video/*`.
pub fn validate_media_type(media_type: &str) -> Result<(), UploadError> {
	if media_type.starts_with("video/") {
		Ok(())
	} else {
		Err(UploadError::NotVideo {
			media_type: media_type.to_string(),
		})
	}
}

/// Incident category, also used as a CSS class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentKind {
	/// Attacker ahead of the last defender.
	Offside,
	/// Illegal contact.
	Foul,
	/// Foul inside the penalty area.
	Penalty,
}

impl IncidentKind {
	/// Lowercase name, e.g. `"offside"`.
	pub fn as_str(self) -> &'static str {
		match self {
			IncidentKind::Offside => "offside",
			IncidentKind::Foul => "foul",
			IncidentKind::Penalty => "penalty",
		}
	}
}

/// The referee-style verdict attached to an incident.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
	/// Decision headline.
	pub decision: &'static str,
	/// Confidence of the decision in `[0, 1]`.
	pub confidence: f64,
	/// One-sentence justification.
	pub summary: &'static str,
}

/// One flagged moment in the video.
#[derive(Clone, Debug, PartialEq)]
pub struct Incident {
	/// Category.
	pub kind: IncidentKind,
	/// Seconds from the start of the video.
	pub timestamp: f64,
	/// Detection confidence in `[0, 1]`.
	pub confidence: f64,
	/// What the detector saw.
	pub description: &'static str,
	/// Verdict attached to the incident.
	pub declaration: Option<Declaration>,
}

/// Output of a finished analysis run.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
	/// The analysed video.
	pub video: VideoInfo,
	/// Incidents in timestamp order.
	pub incidents: Vec<Incident>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn frames_are_floored_at_thirty_fps() {
		assert_eq!(VideoInfo::new(1920, 1080, 100.0).frames, 3000);
		assert_eq!(VideoInfo::new(1920, 1080, 12.345).frames, 370);
		assert_eq!(VideoInfo::new(640, 360, f64::NAN).frames, 0);
		assert_eq!(VideoInfo::new(640, 360, 1.0).resolution(), "640x360");
	}

	#[test]
	fn only_video_types_are_accepted() {
		assert!(validate_media_type("video/mp4").is_ok());
		assert!(validate_media_type("video/webm").is_ok());
		assert_eq!(
			validate_media_type("image/png"),
			Err(UploadError::NotVideo {
				media_type: "image/png".into()
			})
		);
		assert!(validate_media_type("").is_err());
	}
}
