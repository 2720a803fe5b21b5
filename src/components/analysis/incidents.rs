//! Templated incident results.
//!
//! The demo performs no inference: the same three incidents are reported for
//! every video, placed at fixed fractions of its duration.

use super::types::{AnalysisResult, Declaration, Incident, IncidentKind, VideoInfo};

struct Template {
	kind: IncidentKind,
	position: f64,
	confidence: f64,
	description: &'static str,
	decision: &'static str,
	summary: &'static str,
}

const TEMPLATES: [Template; 3] = [
	Template {
		kind: IncidentKind::Offside,
		position: 0.15,
		confidence: 0.91,
		description: "Attacking player beyond defensive line at moment of pass",
		decision: "Offside - Goal Disallowed",
		summary: "Player positioned 34cm beyond the last defender when pass was made.",
	},
	Template {
		kind: IncidentKind::Foul,
		position: 0.42,
		confidence: 0.78,
		description: "Contact detected between players in midfield",
		decision: "Foul Confirmed",
		summary: "Illegal contact from behind, player brought down.",
	},
	Template {
		kind: IncidentKind::Penalty,
		position: 0.71,
		confidence: 0.94,
		description: "Foul committed inside penalty area",
		decision: "Penalty Kick Awarded",
		summary: "Clear contact in box, attacker denied goal-scoring opportunity.",
	},
];

/// The three demo incidents for a video `duration` seconds long.
pub fn simulate_incidents(duration: f64) -> Vec<Incident> {
	TEMPLATES
		.iter()
		.map(|t| Incident {
			kind: t.kind,
			timestamp: duration * t.position,
			confidence: t.confidence,
			description: t.description,
			declaration: Some(Declaration {
				decision: t.decision,
				confidence: t.confidence,
				summary: t.summary,
			}),
		})
		.collect()
}

/// Bundles the video with its templated incidents.
pub fn analyze(video: VideoInfo) -> AnalysisResult {
	let incidents = simulate_incidents(video.duration);
	AnalysisResult { video, incidents }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hundred_second_video_yields_fixed_incidents() {
		let incidents = simulate_incidents(100.0);
		assert_eq!(incidents.len(), 3);

		let expected = [
			(IncidentKind::Offside, 15.0, 0.91),
			(IncidentKind::Foul, 42.0, 0.78),
			(IncidentKind::Penalty, 71.0, 0.94),
		];
		for (incident, (kind, timestamp, confidence)) in incidents.iter().zip(expected) {
			assert_eq!(incident.kind, kind);
			assert!((incident.timestamp - timestamp).abs() < 1e-9);
			assert_eq!(incident.confidence, confidence);
			let declaration = incident.declaration.as_ref().unwrap();
			assert_eq!(declaration.confidence, confidence);
		}
	}

	#[test]
	fn incidents_scale_with_duration_and_stay_ordered() {
		for duration in [0.0, 1.0, 37.5, 5400.0] {
			let incidents = simulate_incidents(duration);
			assert_eq!(incidents.len(), 3);
			assert!(incidents.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
			assert!(incidents.iter().all(|i| i.timestamp <= duration));
		}
	}

	#[test]
	fn analyze_keeps_video_metadata() {
		let video = VideoInfo::new(1280, 720, 100.0);
		let result = analyze(video.clone());
		assert_eq!(result.video, video);
		assert_eq!(result.incidents, simulate_incidents(100.0));
	}
}
