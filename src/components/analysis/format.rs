//! Display formatting for durations, timestamps, and counts.

/// Video length as `m:ss` (minutes unpadded).
pub fn format_duration(seconds: f64) -> String {
	let total = whole_seconds(seconds);
	format!("{}:{:02}", total / 60, total % 60)
}

/// Incident position as `mm:ss`.
pub fn format_timestamp(seconds: f64) -> String {
	let total = whole_seconds(seconds);
	format!("{:02}:{:02}", total / 60, total % 60)
}

fn whole_seconds(seconds: f64) -> u64 {
	if seconds.is_finite() && seconds > 0.0 {
		seconds.floor() as u64
	} else {
		0
	}
}

/// Confidence `0.91` as the integer percentage `91`.
pub fn confidence_percent(confidence: f64) -> u32 {
	(confidence * 100.0).round().clamp(0.0, 100.0) as u32
}

/// `12345` as `"12,345"`.
pub fn group_thousands(n: u64) -> String {
	let digits = n.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn durations_and_timestamps() {
		assert_eq!(format_duration(100.0), "1:40");
		assert_eq!(format_duration(59.9), "0:59");
		assert_eq!(format_duration(3725.0), "62:05");
		assert_eq!(format_timestamp(71.0), "01:11");
		assert_eq!(format_timestamp(15.0), "00:15");
		assert_eq!(format_timestamp(f64::NAN), "00:00");
	}

	#[test]
	fn confidences_round_to_whole_percent() {
		assert_eq!(confidence_percent(0.91), 91);
		assert_eq!(confidence_percent(0.786), 79);
		assert_eq!(confidence_percent(0.94), 94);
	}

	#[test]
	fn thousands_are_grouped() {
		assert_eq!(group_thousands(0), "0");
		assert_eq!(group_thousands(999), "999");
		assert_eq!(group_thousands(3000), "3,000");
		assert_eq!(group_thousands(1234567), "1,234,567");
	}
}
