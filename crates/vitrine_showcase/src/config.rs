//! Showcase configuration
//!
//! Every duration in the showcase layer is presentation tuning, not an
//! invariant. Defaults reproduce the shipped feel; hosts override any
//! subset via TOML. What IS contractual — stage ordering, idempotence,
//! teardown — does not live here.

use serde::Deserialize;
use vitrine_animation::Easing;
use vitrine_core::DEFAULT_MOBILE_BREAKPOINT;

/// Timing for one orchestrator stage
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct StageSpec {
    /// Delay from transition start to this stage, ms
    pub delay_ms: f32,
    pub duration_ms: f32,
    /// Extra delay per successive item (lines, pills), ms
    pub stagger_ms: f32,
    /// Not configurable from TOML; set in code when overriding
    #[serde(skip)]
    pub easing: Easing,
}

impl Default for StageSpec {
    fn default() -> Self {
        Self {
            delay_ms: 0.0,
            duration_ms: 0.0,
            stagger_ms: 0.0,
            easing: Easing::default(),
        }
    }
}

impl StageSpec {
    pub fn new(delay_ms: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            delay_ms,
            duration_ms,
            stagger_ms: 0.0,
            easing,
        }
    }

    pub fn stagger(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }
}

/// Stage timings for a panel's enter sequence
///
/// The relative order numeral → title → lines → pills is load-bearing
/// (visual hierarchy); the numbers are not.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct EnterSpec {
    pub numeral: StageSpec,
    pub title: StageSpec,
    pub lines: StageSpec,
    pub pills: StageSpec,
}

impl Default for EnterSpec {
    fn default() -> Self {
        Self {
            numeral: StageSpec::new(700.0, 1000.0, Easing::EaseOutCubic),
            title: StageSpec::new(850.0, 1100.0, Easing::EaseOutCubic),
            lines: StageSpec::new(1000.0, 900.0, Easing::EaseOutQuad).stagger(100.0),
            pills: StageSpec::new(1400.0, 700.0, Easing::EaseOutBack).stagger(80.0),
        }
    }
}

/// Stage timings for the previous panel's exit sequence
///
/// Exit stages start earlier and run on ease-in so the outgoing content
/// clears before the incoming panel's stages land.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ExitSpec {
    pub numeral: StageSpec,
    pub title: StageSpec,
    pub lines: StageSpec,
    pub pills: StageSpec,
}

impl Default for ExitSpec {
    fn default() -> Self {
        Self {
            numeral: StageSpec::new(0.0, 1300.0, Easing::EaseInQuad),
            title: StageSpec::new(100.0, 1300.0, Easing::EaseInQuad),
            lines: StageSpec::new(200.0, 1100.0, Easing::EaseInQuad).stagger(80.0),
            pills: StageSpec::new(0.0, 900.0, Easing::EaseInQuad).stagger(50.0),
        }
    }
}

/// Top-level showcase tuning
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Width below which the mobile layout applies
    pub mobile_breakpoint: f32,
    /// Whether the eased scroll engine is requested at all
    pub smooth_scrolling: bool,
    /// Duration of the settle-on-a-panel snap animation
    pub snap_duration_ms: f32,
    /// Smoothing applied to the indicator fill (authoritative progress is
    /// never smoothed)
    pub indicator_smoothing_ms: f32,
    /// Hard ceiling on how long the loading gate may hold the page
    pub safety_timeout_ms: f32,
    /// Pointer tilt range, degrees
    pub tilt_max_degrees: f32,
    /// Tilt response to a pointer sample
    pub tilt_response_ms: f32,
    /// Tilt recovery after the pointer leaves
    pub tilt_recover_ms: f32,
    pub enter: EnterSpec,
    pub exit: ExitSpec,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            smooth_scrolling: true,
            snap_duration_ms: 500.0,
            indicator_smoothing_ms: 100.0,
            safety_timeout_ms: 9000.0,
            tilt_max_degrees: 12.0,
            tilt_response_ms: 300.0,
            tilt_recover_ms: 600.0,
            enter: EnterSpec::default(),
            exit: ExitSpec::default(),
        }
    }
}

impl ShowcaseConfig {
    /// Parse from TOML; unspecified fields keep their defaults
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}
