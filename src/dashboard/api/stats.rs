//! Aggregate stats API
//!
//! Re-reads the full profile store per request and computes the operator
//! view: totals, BMI distribution, adherence counts and a masked patient
//! list. Tolerates an empty store and profiles without a BMI.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::error;

use super::health::AppState;
use crate::content::progress_bar;
use crate::profile::{UserProfile, CHECKIN_CEILING};

/// One patient row in the operator view
#[derive(Debug, Serialize)]
pub struct PatientSummary {
    pub phone_masked: String,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub bmi_category: Option<String>,
    pub city: Option<String>,
    pub family_member: Option<String>,
    pub checkins: u32,
    pub adherence_bar: String,
    pub state: String,
}

impl From<&UserProfile> for PatientSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            phone_masked: profile.masked_identity(),
            name: profile.name.clone(),
            age: profile.age,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            bmi: profile.bmi,
            bmi_category: profile.bmi_category.clone(),
            city: profile.city.clone(),
            family_member: profile.family_member.clone(),
            checkins: profile.checkins.min(CHECKIN_CEILING),
            adherence_bar: progress_bar(profile.checkins, CHECKIN_CEILING),
            state: profile.state.as_str().to_string(),
        }
    }
}

/// Aggregate stats response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_patients: usize,
    /// Mean over patients with a BMI, rounded to 1 decimal
    pub average_bmi: Option<f64>,
    pub average_checkins: Option<f64>,
    /// Category → patient count, patients without a BMI excluded
    pub bmi_distribution: BTreeMap<String, usize>,
    pub patients: Vec<PatientSummary>,
}

/// Build the aggregate view from a snapshot of profiles.
pub fn build_stats(profiles: &[UserProfile]) -> StatsResponse {
    let bmis: Vec<f64> = profiles.iter().filter_map(|p| p.bmi).collect();
    let average_bmi = if bmis.is_empty() {
        None
    } else {
        let mean = bmis.iter().sum::<f64>() / bmis.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    };

    let average_checkins = if profiles.is_empty() {
        None
    } else {
        let mean = profiles.iter().map(|p| p.checkins as f64).sum::<f64>() / profiles.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    };

    let mut bmi_distribution = BTreeMap::new();
    for profile in profiles {
        if let Some(category) = &profile.bmi_category {
            *bmi_distribution.entry(category.clone()).or_insert(0) += 1;
        }
    }

    StatsResponse {
        total_patients: profiles.len(),
        average_bmi,
        average_checkins,
        bmi_distribution,
        patients: profiles.iter().map(PatientSummary::from).collect(),
    }
}

/// Stats handler: snapshot the store, aggregate, return JSON.
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, StatusCode> {
    let profiles = state.store.all().await.map_err(|err| {
        error!("stats snapshot failed: {err}");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok(Json(build_stats(&profiles)))
}

/// Create stats router
pub fn stats_router(state: Arc<AppState>) -> Router {
    Router::new().route("/stats", get(stats)).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::OnboardingState;

    fn patient(identity: &str, bmi: Option<f64>, category: Option<&str>, checkins: u32) -> UserProfile {
        let mut profile = UserProfile::new(identity);
        profile.bmi = bmi;
        profile.bmi_category = category.map(str::to_string);
        profile.checkins = checkins;
        profile.state = OnboardingState::Ready;
        profile
    }

    #[test]
    fn empty_store_yields_zeroes() {
        let stats = build_stats(&[]);
        assert_eq!(stats.total_patients, 0);
        assert!(stats.average_bmi.is_none());
        assert!(stats.average_checkins.is_none());
        assert!(stats.bmi_distribution.is_empty());
        assert!(stats.patients.is_empty());
    }

    #[test]
    fn null_bmis_are_skipped_in_the_average() {
        let profiles = vec![
            patient("+911", Some(22.0), Some("Normal"), 2),
            patient("+912", None, None, 4),
            patient("+913", Some(31.0), Some("Obese"), 0),
        ];
        let stats = build_stats(&profiles);
        assert_eq!(stats.total_patients, 3);
        assert_eq!(stats.average_bmi, Some(26.5));
        assert_eq!(stats.average_checkins, Some(2.0));
    }

    #[test]
    fn distribution_counts_by_category() {
        let profiles = vec![
            patient("+911", Some(22.0), Some("Normal"), 0),
            patient("+912", Some(23.0), Some("Normal"), 0),
            patient("+913", Some(31.0), Some("Obese"), 0),
            patient("+914", None, None, 0),
        ];
        let stats = build_stats(&profiles);
        assert_eq!(stats.bmi_distribution.get("Normal"), Some(&2));
        assert_eq!(stats.bmi_distribution.get("Obese"), Some(&1));
        assert_eq!(stats.bmi_distribution.len(), 2);
    }

    #[test]
    fn patient_rows_mask_phones_and_render_bars() {
        let profiles = vec![patient("+919900112233", Some(22.0), Some("Normal"), 6)];
        let stats = build_stats(&profiles);
        assert_eq!(stats.patients[0].phone_masked, "*******233");
        assert_eq!(stats.patients[0].adherence_bar, "▰▰▰▰▰▱▱▱▱▱");
    }
}
