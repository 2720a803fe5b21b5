//! Upload, progress, and results UI for the analysis demo.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::leptos_dom::helpers::{IntervalHandle, set_interval_with_handle, set_timeout};
use leptos::prelude::*;
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	Blob, BlobPropertyBag, DragEvent, File, HtmlAnchorElement, HtmlInputElement, MouseEvent, Url,
};

use super::format::{confidence_percent, format_duration, format_timestamp, group_thousands};
use super::incidents::analyze;
use super::progress::{
	ProgressTracker, REVEAL_STAGGER, RESULTS_DELAY, STAGES, TICK_INTERVAL,
};
use super::report::{Report, export_filename};
use super::types::{AnalysisResult, Incident, VideoInfo, validate_media_type};
use crate::components::effects::ripple;
use crate::error::{DomError, ExportError};

/// Which part of the demo card is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
	Upload,
	Preview,
	Running,
	Done,
}

fn display_when(visible: bool) -> &'static str {
	if visible { "block" } else { "none" }
}

/// Validates the file and points the preview player at it.
/// The previous preview URL is revoked.
fn accept_file(
	file: File,
	video_ref: NodeRef<leptos::html::Video>,
	preview_url: &Rc<RefCell<Option<String>>>,
) {
	if let Err(e) = validate_media_type(&file.type_()) {
		warn!("kornerflag: rejected upload {:?}: {}", file.name(), e);
		if let Some(window) = web_sys::window() {
			let _ = window.alert_with_message(&e.to_string());
		}
		return;
	}
	let Some(video) = video_ref.get() else {
		return;
	};
	match Url::create_object_url_with_blob(&file) {
		Ok(url) => {
			if let Some(old) = preview_url.borrow_mut().replace(url.clone()) {
				let _ = Url::revoke_object_url(&old);
			}
			video.set_src(&url);
			info!("kornerflag: previewing {} ({})", file.name(), file.type_());
		}
		Err(e) => error!("kornerflag: cannot preview upload: {:?}", e),
	}
}

/// Offers `json` as a file download named `filename`.
fn download_json(filename: &str, json: &str) -> Result<(), DomError> {
	let window = web_sys::window().ok_or(DomError::NoWindow)?;
	let document = window.document().ok_or(DomError::NoDocument)?;
	let body = document.body().ok_or(DomError::NoDocument)?;

	let parts = js_sys::Array::of1(&JsValue::from_str(json));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
		.map_err(|e| DomError::js("create report blob", e))?;
	let url =
		Url::create_object_url_with_blob(&blob).map_err(|e| DomError::js("create object url", e))?;

	let anchor: HtmlAnchorElement = document
		.create_element("a")
		.map_err(|e| DomError::js("create anchor", e))?
		.dyn_into()
		.map_err(|e| DomError::js("cast anchor", e.into()))?;
	anchor.set_href(&url);
	anchor.set_download(filename);
	body.append_child(&anchor)
		.map_err(|e| DomError::js("attach anchor", e))?;
	anchor.click();
	let _ = body.remove_child(&anchor);
	Url::revoke_object_url(&url).map_err(|e| DomError::js("revoke object url", e))?;
	Ok(())
}

/// Builds the report for `result` and triggers its download.
fn export_report(result: Option<&AnalysisResult>) -> Result<String, ExportError> {
	let result = result.ok_or(ExportError::NothingToExport)?;
	let generated: String = js_sys::Date::new_0().to_iso_string().into();
	let json = Report::build(result, &generated).to_json()?;
	let filename = export_filename(&generated);
	download_json(&filename, &json)?;
	Ok(filename)
}

/// Drag-and-drop video upload with a simulated VAR analysis and JSON export.
#[component]
pub fn AnalysisDemo() -> impl IntoView {
	let video_ref = NodeRef::<leptos::html::Video>::new();
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let preview_url: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

	let phase = RwSignal::new(Phase::Upload);
	let dragover = RwSignal::new(false);
	let video_info = RwSignal::new(None::<VideoInfo>);
	let progress = RwSignal::new(0.0_f64);
	let stage = RwSignal::new(STAGES[0]);
	let result = RwSignal::new(None::<AnalysisResult>);

	let preview_drop = preview_url.clone();
	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		dragover.set(false);
		let file = ev
			.data_transfer()
			.and_then(|dt| dt.files())
			.and_then(|files| files.get(0));
		if let Some(file) = file {
			accept_file(file, video_ref, &preview_drop);
		}
	};

	let preview_pick = preview_url.clone();
	let on_change = move |ev: web_sys::Event| {
		let input: HtmlInputElement = event_target(&ev);
		if let Some(file) = input.files().and_then(|files| files.get(0)) {
			accept_file(file, video_ref, &preview_pick);
		}
	};

	let on_metadata = move |_| {
		let Some(video) = video_ref.get() else {
			return;
		};
		let info = VideoInfo::new(video.video_width(), video.video_height(), video.duration());
		info!(
			"kornerflag: video {} {:.1}s ({} frames)",
			info.resolution(),
			info.duration,
			info.frames
		);
		video_info.set(Some(info));
		result.set(None);
		phase.set(Phase::Preview);
	};

	let on_run = move |ev: MouseEvent| {
		ripple(&ev);
		let Some(info) = video_info.get_untracked() else {
			return;
		};
		phase.set(Phase::Running);
		progress.set(0.0);
		stage.set(STAGES[0]);

		let tracker = RefCell::new(ProgressTracker::new());
		let handle: Rc<Cell<Option<IntervalHandle>>> = Rc::new(Cell::new(None));
		let handle_tick = handle.clone();
		let started = set_interval_with_handle(
			move || {
				let mut t = tracker.borrow_mut();
				if let Some(label) = t.tick() {
					stage.set(label);
				}
				progress.set(t.percent());
				if !t.is_complete() {
					return;
				}
				if let Some(h) = handle_tick.take() {
					h.clear();
				}
				let info = info.clone();
				set_timeout(
					move || {
						let analysis = analyze(info);
						info!(
							"kornerflag: analysis finished with {} incidents",
							analysis.incidents.len()
						);
						result.set(Some(analysis));
						phase.set(Phase::Done);
					},
					RESULTS_DELAY,
				);
			},
			TICK_INTERVAL,
		);
		match started {
			Ok(h) => handle.set(Some(h)),
			Err(e) => error!("kornerflag: cannot start progress timer: {:?}", e),
		}
	};

	let on_export = move |ev: MouseEvent| {
		ripple(&ev);
		let outcome = result.with_untracked(|r| export_report(r.as_ref()));
		match outcome {
			Ok(filename) => info!("kornerflag: exported {}", filename),
			Err(ExportError::NothingToExport) => debug!("kornerflag: nothing to export yet"),
			Err(e) => error!("kornerflag: export failed: {}", e),
		}
	};

	let duration_text = move || {
		video_info
			.get()
			.map(|v| format_duration(v.duration))
			.unwrap_or_default()
	};
	let resolution_text = move || video_info.get().map(|v| v.resolution()).unwrap_or_default();
	let frames_text = move || {
		result
			.get()
			.map(|r| group_thousands(r.video.frames))
			.unwrap_or_default()
	};
	let incident_count = move || result.get().map(|r| r.incidents.len()).unwrap_or(0);

	view! {
		<section id="demo" class="demo-section">
			<div class="section-header">
				<h2>"See it in action"</h2>
				<p>"Upload a match clip and watch the VAR pipeline flag key incidents."</p>
			</div>

			<div class="demo-grid">
				<div class="demo-card">
					<input
						node_ref=input_ref
						id="videoInput"
						type="file"
						accept="video/*"
						style="display: none;"
						on:change=on_change
					/>
					<div
						id="uploadArea"
						class="upload-area"
						class:dragover=move || dragover.get()
						style:display=move || display_when(phase.get() == Phase::Upload)
						on:click=move |_| {
							if let Some(input) = input_ref.get() {
								input.click();
							}
						}
						on:dragover=move |ev: DragEvent| {
							ev.prevent_default();
							dragover.set(true);
						}
						on:dragleave=move |_| dragover.set(false)
						on:drop=on_drop
					>
						<p class="upload-title">"Drop a video here or click to browse"</p>
						<p class="upload-hint">"MP4, WebM or MOV"</p>
					</div>

					<div
						id="videoPreview"
						class="video-preview"
						style:display=move || display_when(phase.get() != Phase::Upload)
					>
						<video
							node_ref=video_ref
							id="previewVideo"
							controls=true
							muted=true
							playsinline=true
							on:loadedmetadata=on_metadata
						/>
						<div class="video-metrics">
							<div class="metric">
								<span class="metric-label">"Resolution"</span>
								<span id="metricResolution" class="metric-value">{resolution_text}</span>
							</div>
							<div class="metric">
								<span class="metric-label">"Duration"</span>
								<span id="metricDuration" class="metric-value">{duration_text}</span>
							</div>
						</div>
					</div>

					<button
						id="runAnalysis"
						class="btn btn-primary"
						style:display=move || display_when(phase.get() == Phase::Preview)
						on:click=on_run
					>
						"Run Analysis"
					</button>

					<div
						id="progressContainer"
						class="progress-container"
						style:display=move || display_when(phase.get() == Phase::Running)
					>
						<div class="progress-bar">
							<div
								id="progressFill"
								class="progress-fill"
								style:width=move || format!("{}%", progress.get())
							></div>
						</div>
						<p id="progressText" class="progress-text">{move || stage.get()}</p>
					</div>
				</div>

				<div
					id="resultsCard"
					class="demo-card results-card"
					style:display=move || display_when(phase.get() == Phase::Done)
				>
					<h3>"Analysis Results"</h3>
					<div class="result-metrics">
						<div class="metric">
							<span class="metric-label">"Frames analyzed"</span>
							<span id="resultFrames" class="metric-value">{frames_text}</span>
						</div>
						<div class="metric">
							<span class="metric-label">"Incidents"</span>
							<span id="resultIncidents" class="metric-value">{incident_count}</span>
						</div>
					</div>
					<button id="exportBtn" class="btn btn-secondary" on:click=on_export>
						"Export Report"
					</button>
				</div>

				<div
					id="incidentsCard"
					class="demo-card incidents-card"
					style:display=move || display_when(phase.get() == Phase::Done)
				>
					<div class="incidents-header">
						<h3>"Detected Incidents"</h3>
						<span id="incidentCount" class="incident-count">
							{move || format!("{} found", incident_count())}
						</span>
					</div>
					<div id="incidentsList" class="incidents-list">
						{move || {
							result
								.get()
								.map(|r| {
									r.incidents
										.into_iter()
										.enumerate()
										.map(|(index, incident)| {
											view! { <IncidentRow incident=incident index=index /> }
										})
										.collect_view()
								})
						}}
					</div>
				</div>
			</div>
		</section>
	}
}

/// One incident with its decision panel; rows fade in one after another.
#[component]
fn IncidentRow(incident: Incident, index: usize) -> impl IntoView {
	let delay_ms = REVEAL_STAGGER.as_millis() as usize * index;
	let style = format!(
		"opacity: 0; animation: fadeInUp 0.4s ease forwards; animation-delay: {}ms;",
		delay_ms
	);
	let kind = incident.kind.as_str();
	let declaration = incident.declaration.map(|d| {
		view! {
			<div class="declaration-panel">
				<span class="declaration-badge">"VAR Decision"</span>
				<h4 class="declaration-decision">{d.decision}</h4>
				<p class="declaration-summary">{d.summary}</p>
				<div class="declaration-footer">
					<span>"Confidence"</span>
					<span>{format!("{}%", confidence_percent(d.confidence))}</span>
				</div>
			</div>
		}
	});

	view! {
		<div class="incident-row" style=style>
			<div class="incident-header">
				<div class="incident-meta">
					<span class=format!("incident-type {}", kind)>{kind}</span>
					<span class="incident-time">{format_timestamp(incident.timestamp)}</span>
				</div>
				<span class="incident-confidence">
					{format!("{}%", confidence_percent(incident.confidence))}
				</span>
			</div>
			<p class="incident-description">{incident.description}</p>
			{declaration}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn export_without_results_is_refused() {
		assert!(matches!(
			export_report(None),
			Err(ExportError::NothingToExport)
		));
	}

	#[test]
	fn only_the_current_phase_is_displayed() {
		assert_eq!(display_when(true), "block");
		assert_eq!(display_when(false), "none");
	}
}
