//! Timer-driven fake progress through labelled analysis stages.

use std::time::Duration;

/// Stage labels shown while the progress bar fills.
pub const STAGES: [&str; 8] = [
	"Initializing AI modules...",
	"Loading YOLOv8 models...",
	"Processing video frames...",
	"Detecting players & ball...",
	"Calculating field homography...",
	"Analyzing incidents...",
	"Generating VAR report...",
	"Analysis complete!",
];

/// Time between progress ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(40);
/// Percentage added per tick.
pub const PROGRESS_STEP: f64 = 1.5;
/// Pause between reaching 100% and revealing results.
pub const RESULTS_DELAY: Duration = Duration::from_millis(500);
/// Delay between consecutive incident rows appearing.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(200);

/// Progress state advanced once per tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressTracker {
	progress: f64,
	stage: usize,
}

impl ProgressTracker {
	/// Tracker at 0% in the first stage.
	pub fn new() -> Self {
		Self::default()
	}

	/// Advances one tick. Returns the label of a newly entered stage.
	pub fn tick(&mut self) -> Option<&'static str> {
		self.progress += PROGRESS_STEP;
		let stage_span = 100.0 / STAGES.len() as f64;
		let index = (self.progress / stage_span).floor() as usize;
		if index != self.stage && index < STAGES.len() {
			self.stage = index;
			return Some(STAGES[index]);
		}
		None
	}

	/// Bar width in percent, capped at 100.
	pub fn percent(&self) -> f64 {
		self.progress.min(100.0)
	}

	/// Label of the stage currently shown.
	pub fn stage_label(&self) -> &'static str {
		STAGES[self.stage]
	}

	/// Whether the bar has reached 100%.
	pub fn is_complete(&self) -> bool {
		self.progress >= 100.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn completes_after_sixty_seven_ticks() {
		let mut tracker = ProgressTracker::new();
		for _ in 0..66 {
			tracker.tick();
		}
		assert!(!tracker.is_complete());
		tracker.tick();
		assert!(tracker.is_complete());
		assert_eq!(tracker.percent(), 100.0);
		assert_eq!(tracker.stage_label(), "Analysis complete!");
	}

	#[test]
	fn every_stage_is_entered_once_in_order() {
		let mut tracker = ProgressTracker::new();
		assert_eq!(tracker.stage_label(), STAGES[0]);
		let mut entered = Vec::new();
		while !tracker.is_complete() {
			if let Some(label) = tracker.tick() {
				entered.push(label);
			}
		}
		assert_eq!(entered, STAGES[1..].to_vec());
	}
}
