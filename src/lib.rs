//! kornerflag-landing: the kornerFlag marketing page as a client-side Leptos app.
//!
//! The page combines three interactive pieces:
//! - a persisted light/dark theme that follows the system preference until
//!   the visitor picks one ([`components::theme`]),
//! - an animated particle network behind the content
//!   ([`components::particle_field`]),
//! - a simulated VAR analysis of an uploaded clip with JSON export
//!   ([`components::analysis`]).

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

// Pulled in only for its `js` feature, which backs `rand` on wasm.
use getrandom as _;

pub mod components;
pub mod config;
pub mod error;

pub use components::analysis::AnalysisDemo;
pub use components::effects::reveal_on_scroll;
pub use components::navbar::{Navbar, SectionLink};
pub use components::particle_field::{ParticleConfig, ParticleFieldCanvas};
pub use components::theme::{ThemeMode, ThemeToggle, provide_theme};
pub use config::{LandingConfig, load_config};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("kornerflag: logging initialized");
}

/// One capability card in the features grid.
#[component]
fn FeatureCard(title: &'static str, body: &'static str) -> impl IntoView {
	view! {
		<div class="feature-card">
			<h3>{title}</h3>
			<p>{body}</p>
		</div>
	}
}

/// One headline figure under the hero text.
#[component]
fn StatItem(value: &'static str, label: &'static str) -> impl IntoView {
	view! {
		<div class="stat-item">
			<span class="stat-value">{value}</span>
			<span class="stat-label">{label}</span>
		</div>
	}
}

/// Main application component.
/// Reads page configuration from the DOM and lays out the landing page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();
	provide_theme();
	reveal_on_scroll();

	let LandingConfig { particles, seed } = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="kornerFlag | AI-Powered VAR Analysis" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta
			name="description"
			content="kornerFlag brings automated offside, foul and penalty review to every match."
		/>

		<ParticleFieldCanvas config=particles seed=seed />
		<Navbar />

		<main>
			<section id="home" class="hero">
				<div class="hero-content">
					<h1>"Every call, "<span class="gradient-text">"reviewed in seconds"</span></h1>
					<p class="hero-subtitle">
						"kornerFlag tracks players and the ball frame by frame to flag offsides, fouls and penalties before the restart."
					</p>
					<div class="hero-actions">
						<SectionLink target="demo" class="btn btn-primary">"Try the demo"</SectionLink>
						<SectionLink target="features" class="btn btn-secondary">"How it works"</SectionLink>
					</div>
					<div class="hero-stats">
						<StatItem value="30 fps" label="Frame-by-frame tracking" />
						<StatItem value="8" label="Pipeline stages" />
						<StatItem value="3" label="Incident types reviewed" />
					</div>
				</div>
			</section>

			<section id="features" class="features-section">
				<div class="section-header">
					<h2>"Built for match officials"</h2>
				</div>
				<div class="features-grid">
					<FeatureCard
						title="Offside lines"
						body="Field homography turns broadcast footage into a calibrated pitch model for centimetre-level offside calls."
					/>
					<FeatureCard
						title="Foul detection"
						body="Player and ball tracking highlights contact events and rates them by severity."
					/>
					<FeatureCard
						title="Penalty review"
						body="Incidents inside the box are escalated with a suggested decision and confidence score."
					/>
				</div>
			</section>

			<AnalysisDemo />
		</main>

		<footer class="footer">
			<p>"© kornerFlag. Demo results are simulated."</p>
		</footer>
	}
}
