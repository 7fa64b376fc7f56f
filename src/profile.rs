//! User profile record and onboarding state
//!
//! One record per identity (phone number). Fields are null until captured
//! by the onboarding flow; the state column drives which input is expected
//! next.

use serde::{Deserialize, Serialize};

/// Onboarding states, in required order. `Ready` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingState {
    New,
    AwaitingName,
    AwaitingAge,
    AwaitingHeight,
    AwaitingWeight,
    AwaitingCity,
    AwaitingFamilyName,
    AwaitingFamilyRelation,
    Ready,
}

impl OnboardingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::AwaitingName => "awaiting_name",
            Self::AwaitingAge => "awaiting_age",
            Self::AwaitingHeight => "awaiting_height",
            Self::AwaitingWeight => "awaiting_weight",
            Self::AwaitingCity => "awaiting_city",
            Self::AwaitingFamilyName => "awaiting_family_name",
            Self::AwaitingFamilyRelation => "awaiting_family_relation",
            Self::Ready => "ready",
        }
    }

    /// Parse a persisted state string. Unknown values fall back to `New`
    /// so a corrupted row restarts onboarding instead of wedging the user.
    pub fn from_str_or_new(s: &str) -> Self {
        match s {
            "new" => Self::New,
            "awaiting_name" => Self::AwaitingName,
            "awaiting_age" => Self::AwaitingAge,
            "awaiting_height" => Self::AwaitingHeight,
            "awaiting_weight" => Self::AwaitingWeight,
            "awaiting_city" => Self::AwaitingCity,
            "awaiting_family_name" => Self::AwaitingFamilyName,
            "awaiting_family_relation" => Self::AwaitingFamilyRelation,
            "ready" => Self::Ready,
            _ => Self::New,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Maximum weekly check-ins for the adherence challenge.
pub const CHECKIN_CEILING: u32 = 12;

/// Per-identity profile record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque identity key (phone number), immutable once created
    pub identity: String,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    /// Computed once at weight capture, never recomputed
    pub bmi: Option<f64>,
    pub bmi_category: Option<String>,
    /// Canonical city after alias resolution
    pub city: Option<String>,
    /// Staged during onboarding, then folded into `family_member`
    pub family_member_name: Option<String>,
    pub family_member_relation: Option<String>,
    /// Composite display string, e.g. "Raj (Parent)"
    pub family_member: Option<String>,
    /// Weekly check-in counter, clamped at [`CHECKIN_CEILING`]
    pub checkins: u32,
    pub state: OnboardingState,
    /// Total inbound messages, gates the periodic hydration nudge
    pub message_count: u32,
}

impl UserProfile {
    /// Fresh record for an unseen identity
    pub fn new(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            name: None,
            age: None,
            height_cm: None,
            weight_kg: None,
            bmi: None,
            bmi_category: None,
            city: None,
            family_member_name: None,
            family_member_relation: None,
            family_member: None,
            checkins: 0,
            state: OnboardingState::New,
            message_count: 0,
        }
    }

    /// Phone masked to the last 3 digits for operator views
    pub fn masked_identity(&self) -> String {
        let tail: String = self
            .identity
            .chars()
            .rev()
            .take(3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if tail.is_empty() {
            "—".to_string()
        } else {
            format!("*******{tail}")
        }
    }
}
