use crate::hazard::{Coordinate, Hazard, PredictionResult, RiskAssessment};

/// Bars with a non-zero risk below this height are drawn at this height.
pub const MIN_VISIBLE_PERCENT: f64 = 5.0;
pub const LOADING_HEIGHT_PERCENT: f64 = 5.0;
pub const LOADING_FILL_CSS: &str = "#666";
pub const GLOW_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Green,
    Orange,
    Red,
}

impl BarColor {
    /// Step function over the clamped probability: (70, 100] red, (40, 70] orange, else green.
    pub fn for_probability(p: f64) -> Self {
        if p > 70.0 {
            Self::Red
        } else if p > 40.0 {
            Self::Orange
        } else {
            Self::Green
        }
    }

    pub const fn css(self) -> &'static str {
        match self {
            Self::Green => "#00ff99",
            Self::Orange => "#ffa500",
            Self::Red => "#ff4444",
        }
    }
}

/// Visual attributes of one bar, derived purely from its probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualBarState {
    pub height_percent: f64,
    pub display_height_percent: f64,
    pub color: BarColor,
    pub glow: bool,
    pub min_height_px: u32,
    pub opacity: f64,
}

impl VisualBarState {
    pub fn from_probability(probability: f64) -> Self {
        let p = clamp_probability(probability);
        let empty = p == 0.0;
        Self {
            height_percent: p,
            display_height_percent: display_height(p),
            color: BarColor::for_probability(p),
            glow: p > GLOW_THRESHOLD,
            min_height_px: if empty { 0 } else { 2 },
            opacity: if empty { 0.3 } else { 1.0 },
        }
    }

    fn loading() -> Self {
        Self {
            height_percent: 0.0,
            display_height_percent: LOADING_HEIGHT_PERCENT,
            color: BarColor::Green,
            glow: false,
            min_height_px: 2,
            opacity: 1.0,
        }
    }
}

/// Clamp to [0, 100]; NaN collapses to 0.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) }
}

/// Height actually drawn, keeping near-zero risk perceptible.
pub fn display_height(p: f64) -> f64 {
    if p > 0.0 && p < MIN_VISIBLE_PERCENT {
        MIN_VISIBLE_PERCENT
    } else {
        p
    }
}

/// Coarse background tint from the highest of the three probabilities.
///
/// Breakpoints are 40/70/90, not the per-bar 40/70/80.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTint {
    Neutral,
    Caution,
    Warning,
    Alert,
}

impl DashboardTint {
    pub fn for_max_probability(max: f64) -> Self {
        if max > 90.0 {
            Self::Alert
        } else if max > 70.0 {
            Self::Warning
        } else if max > 40.0 {
            Self::Caution
        } else {
            Self::Neutral
        }
    }

    pub const fn css(self) -> &'static str {
        match self {
            Self::Neutral => "#111",
            Self::Caution => "#ffff66",
            Self::Warning => "#ffa500",
            Self::Alert => "#ff4d4d",
        }
    }
}

/// Text plus CSS class for a risk-level badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub class_name: String,
}

/// Lowercase and replace every whitespace run with a single `-`.
pub fn level_token(level: &str) -> String {
    let mut out = String::with_capacity(level.len());
    let mut in_space = false;
    for ch in level.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        out.extend(ch.to_lowercase());
    }
    out
}

/// `risk-<token>` class for a level string, e.g. `"High Risk"` -> `"risk-high-risk"`.
pub fn risk_class(level: &str) -> String {
    format!("risk-{}", level_token(level))
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub hazard: Hazard,
    pub state: VisualBarState,
    pub loading: bool,
    /// Percentage text, one decimal. `None` while loading or reset.
    pub label: Option<String>,
    pub count_text: String,
    pub badge: Option<Badge>,
    pub message: Option<String>,
}

impl BarView {
    pub fn reset(hazard: Hazard) -> Self {
        Self {
            hazard,
            state: VisualBarState::from_probability(0.0),
            loading: false,
            label: None,
            count_text: count_text(None),
            badge: None,
            message: None,
        }
    }

    pub fn loading(hazard: Hazard) -> Self {
        Self {
            state: VisualBarState::loading(),
            loading: true,
            ..Self::reset(hazard)
        }
    }

    pub fn project(hazard: Hazard, risk: &RiskAssessment) -> Self {
        let p = clamp_probability(risk.probability);
        Self {
            hazard,
            state: VisualBarState::from_probability(p),
            loading: false,
            label: Some(format!("{}%", to_fixed_1(p))),
            count_text: count_text(risk.nearby_count),
            badge: risk.level.as_deref().map(|level| Badge {
                text: level.to_string(),
                class_name: risk_class(level),
            }),
            message: risk.message.clone(),
        }
    }

    pub fn fill_css(&self) -> &'static str {
        if self.loading {
            LOADING_FILL_CSS
        } else {
            self.state.color.css()
        }
    }
}

/// One-decimal text where an exact tie rounds away from zero (`12.25` gives `12.3`).
///
/// The only f64 values sitting exactly on a one-decimal midpoint are the
/// quarters `k.25` and `k.75`; every other `x.x5` is stored slightly off the
/// midpoint and `{:.1}` already rounds it the right way.
pub fn to_fixed_1(x: f64) -> String {
    let is_tie = x.is_finite() && (x * 4.0).fract() == 0.0 && (x * 2.0).fract() != 0.0;
    if !is_tie {
        return format!("{x:.1}");
    }
    let away = (x.abs() * 10.0).ceil() / 10.0;
    format!("{:.1}", away.copysign(x))
}

fn count_text(count: Option<u64>) -> String {
    format!("{} nearby", count.unwrap_or(0))
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallSummary {
    pub headline: Option<Badge>,
    pub message: Option<String>,
}

/// Everything the dashboard renders, as one value.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub bars: [BarView; 3],
    pub summary: Option<OverallSummary>,
    pub location: Option<String>,
    pub tint: DashboardTint,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::reset()
    }
}

impl DashboardView {
    /// Zeroed state: empty bars, "0 nearby", no badges, summary and location hidden.
    pub fn reset() -> Self {
        Self {
            bars: Hazard::ALL.map(BarView::reset),
            summary: None,
            location: None,
            tint: DashboardTint::Neutral,
        }
    }

    /// Neutral placeholder shown between a click and its response.
    pub fn loading(coord: &Coordinate) -> Self {
        Self {
            bars: Hazard::ALL.map(BarView::loading),
            location: Some(coord.display()),
            ..Self::reset()
        }
    }

    pub fn bar(&self, hazard: Hazard) -> &BarView {
        &self.bars[hazard.index()]
    }

    pub fn is_reset(&self) -> bool {
        *self == Self::reset()
    }
}

/// Map a normalized result onto the dashboard.
pub fn project(result: &PredictionResult) -> DashboardView {
    let summary = result.overall.as_ref().map(|overall| OverallSummary {
        headline: overall.risk_level.as_deref().map(|level| {
            let suffix = overall
                .max_probability
                .map(|max| format!(" ({max}%)"))
                .unwrap_or_default();
            Badge {
                text: format!("Overall Risk: {level}{suffix}"),
                class_name: risk_class(level),
            }
        }),
        message: overall.message.clone(),
    });

    DashboardView {
        bars: Hazard::ALL.map(|hazard| BarView::project(hazard, result.risk(hazard))),
        summary,
        location: result.location.as_ref().map(|loc| loc.coordinates.clone()),
        tint: DashboardTint::for_max_probability(result.max_probability()),
    }
}
