//! Plan-gated visibility.
//!
//! Premium content is always produced so layouts stay stable; for tiers
//! without premium access it is marked non-interactive, obscured, and
//! overlaid with an upgrade prompt. The decision is a pure function of its
//! inputs and is re-evaluated on every render.

use serde::{Deserialize, Serialize};

use crate::plan::PlanTier;

/// Label on the upgrade call-to-action button.
pub const UPGRADE_CTA: &str = "Upgrade to Pro";

/// Anything that can be marked premium: charts, report modules, pages.
pub trait FeatureFlagged {
    fn feature_name(&self) -> &str;
    fn is_premium(&self) -> bool;
    fn feature_description(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    Open,
    Gated,
}

/// Outcome of [`decide`]. `title` and `prompt_text` are empty when open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    pub mode: GateMode,
    pub title: String,
    pub prompt_text: String,
}

impl GateDecision {
    fn open() -> Self {
        Self {
            mode: GateMode::Open,
            title: String::new(),
            prompt_text: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode == GateMode::Open
    }

    /// Apply the decision to rendered content.
    pub fn wrap<T>(&self, content: T) -> Gated<T> {
        match self.mode {
            GateMode::Open => Gated::Open(content),
            GateMode::Gated => Gated::Obscured {
                content,
                overlay: Overlay {
                    title: self.title.clone(),
                    prompt_text: self.prompt_text.clone(),
                    cta_label: UPGRADE_CTA,
                },
            },
        }
    }
}

/// Prompt shown when the caller supplies no description.
pub fn default_prompt(feature_name: &str) -> String {
    format!(
        "Upgrade to the Pro plan to unlock {feature_name} and get deeper energy analytics insights."
    )
}

/// Decide whether content named `feature_name` renders plainly.
///
/// An empty `description` falls back to [`default_prompt`].
pub fn decide(is_premium_user: bool, feature_name: &str, description: Option<&str>) -> GateDecision {
    if is_premium_user {
        return GateDecision::open();
    }
    let prompt_text = match description {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => default_prompt(feature_name),
    };
    GateDecision {
        mode: GateMode::Gated,
        title: feature_name.to_string(),
        prompt_text,
    }
}

/// Gate a flagged item for `tier`. Non-premium items are always open.
pub fn evaluate<F>(tier: PlanTier, item: &F) -> GateDecision
where
    F: FeatureFlagged + ?Sized,
{
    if !item.is_premium() {
        return GateDecision::open();
    }
    decide(
        tier.has_premium_access(),
        item.feature_name(),
        item.feature_description(),
    )
}

// ---------------------------------------------------------------------------
// Gated content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub title: String,
    pub prompt_text: String,
    pub cta_label: &'static str,
}

/// Rendered content after gating.
#[derive(Debug, Clone, PartialEq)]
pub enum Gated<T> {
    Open(T),
    /// Still rendered for layout, but blurred and not interactive.
    Obscured { content: T, overlay: Overlay },
}

impl<T> Gated<T> {
    pub fn content(&self) -> &T {
        match self {
            Gated::Open(c) => c,
            Gated::Obscured { content, .. } => content,
        }
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        match self {
            Gated::Open(_) => None,
            Gated::Obscured { overlay, .. } => Some(overlay),
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Gated::Open(_))
    }

    /// Forward one click on the upgrade button. Open content has no button,
    /// so nothing fires; otherwise the callback runs exactly once.
    pub fn click_upgrade<F: FnMut()>(&self, callback: Option<&mut F>) -> bool {
        match (self, callback) {
            (Gated::Obscured { .. }, Some(cb)) => {
                cb();
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
