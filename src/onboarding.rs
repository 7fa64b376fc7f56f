//! Onboarding state machine
//!
//! One field per turn: each transition is a pure function of the stored
//! profile and one line of text. Invalid numeric input re-prompts in place
//! and writes nothing; every other state advances strictly forward until
//! `Ready`, which is absorbing.

use crate::bmi::calculate_bmi;
use crate::profile::{OnboardingState, UserProfile};
use crate::validators::{normalize_city, normalize_relation, parse_age, parse_measurement, title_case};

/// Result of one onboarding turn: the updated record and the reply to send.
#[derive(Debug, Clone)]
pub struct Transition {
    pub profile: UserProfile,
    pub reply: String,
}

/// Advance the onboarding flow by one message.
///
/// Must not be called once the profile is `Ready`; ready-state input
/// belongs to the menu dispatcher.
pub fn advance(mut profile: UserProfile, input: &str) -> Transition {
    let text = input.trim();
    let reply = match profile.state {
        OnboardingState::New => {
            // Input is ignored entirely on first contact.
            profile.state = OnboardingState::AwaitingName;
            "✅ Product verified: Wegovy authenticity confirmed.\n👋 Welcome to Wegovy Sampark! What's your *name*?".to_string()
        }

        OnboardingState::AwaitingName => {
            let name = title_case(text);
            let greeting = format!("Hi {name}! 🎉 How old are you?");
            profile.name = Some(name);
            profile.state = OnboardingState::AwaitingAge;
            greeting
        }

        OnboardingState::AwaitingAge => match parse_age(text) {
            Some(age) => {
                profile.age = Some(age);
                profile.state = OnboardingState::AwaitingHeight;
                "Got it! What is your *height* in cm?".to_string()
            }
            None => "Please enter a valid number for age.".to_string(),
        },

        OnboardingState::AwaitingHeight => match parse_measurement(text) {
            Some(height) => {
                profile.height_cm = Some(height);
                profile.state = OnboardingState::AwaitingWeight;
                "Great! Now tell me your *weight* in kg.".to_string()
            }
            None => "Please enter a valid height in cm.".to_string(),
        },

        OnboardingState::AwaitingWeight => match parse_measurement(text) {
            Some(weight) => {
                profile.weight_kg = Some(weight);
                profile.state = OnboardingState::AwaitingCity;
                // BMI is computed once, here, from the stored height.
                match profile.height_cm.and_then(|h| calculate_bmi(h, weight)) {
                    Some((bmi, category)) => {
                        profile.bmi = Some(bmi);
                        profile.bmi_category = Some(category.as_str().to_string());
                        format!(
                            "✅ Saved your details!\nYour BMI is *{bmi:.1}* ({category}).\nWhich *city* are you from?"
                        )
                    }
                    None => "✅ Saved your details!\nWhich *city* are you from?".to_string(),
                }
            }
            None => "Please enter a valid weight in kg.".to_string(),
        },

        OnboardingState::AwaitingCity => {
            let city = normalize_city(text);
            let reply = format!(
                "🏙️ Got it! You're from {city}.\nNow tell me your *family member's name*."
            );
            profile.city = Some(city);
            profile.state = OnboardingState::AwaitingFamilyName;
            reply
        }

        OnboardingState::AwaitingFamilyName => {
            profile.family_member_name = Some(title_case(text));
            profile.state = OnboardingState::AwaitingFamilyRelation;
            "And what is their *relation* to you? (e.g., Brother, Mother)".to_string()
        }

        OnboardingState::AwaitingFamilyRelation => {
            let relation = normalize_relation(text);
            let fam_name = profile.family_member_name.clone().unwrap_or_default();
            let composite = format!("{fam_name} ({relation})");
            profile.family_member_relation = Some(relation);
            profile.family_member = Some(composite.clone());
            profile.state = OnboardingState::Ready;
            format!("📨 Family member added: {composite} ❤️\nType 'menu' to see options.")
        }

        OnboardingState::Ready => {
            // Absorbing state; the dispatcher owns ready-state input.
            "✅ Onboarding complete! Type 'menu' to see options.".to_string()
        }
    };

    Transition { profile, reply }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> UserProfile {
        UserProfile::new("+911234567890")
    }

    #[test]
    fn new_state_ignores_input_and_welcomes() {
        let t = advance(fresh(), "anything at all");
        assert_eq!(t.profile.state, OnboardingState::AwaitingName);
        assert!(t.profile.name.is_none());
        assert!(t.reply.contains("Welcome"));
    }

    #[test]
    fn name_is_title_cased_and_greeted() {
        let mut profile = fresh();
        profile.state = OnboardingState::AwaitingName;
        let t = advance(profile, "alice");
        assert_eq!(t.profile.name.as_deref(), Some("Alice"));
        assert_eq!(t.profile.state, OnboardingState::AwaitingAge);
        assert!(t.reply.contains("Hi Alice"));
    }

    #[test]
    fn invalid_age_does_not_advance() {
        let mut profile = fresh();
        profile.state = OnboardingState::AwaitingAge;
        let t = advance(profile, "abc");
        assert_eq!(t.profile.state, OnboardingState::AwaitingAge);
        assert!(t.profile.age.is_none());
        assert!(t.reply.contains("valid number"));
    }

    #[test]
    fn invalid_height_and_weight_reprompt() {
        let mut profile = fresh();
        profile.state = OnboardingState::AwaitingHeight;
        let t = advance(profile, "tall");
        assert_eq!(t.profile.state, OnboardingState::AwaitingHeight);
        assert!(t.profile.height_cm.is_none());

        let mut profile = fresh();
        profile.state = OnboardingState::AwaitingWeight;
        profile.height_cm = Some(165.0);
        let t = advance(profile, "heavy");
        assert_eq!(t.profile.state, OnboardingState::AwaitingWeight);
        assert!(t.profile.weight_kg.is_none());
        assert!(t.profile.bmi.is_none());
    }

    #[test]
    fn weight_capture_computes_bmi_once() {
        let mut profile = fresh();
        profile.state = OnboardingState::AwaitingWeight;
        profile.height_cm = Some(165.0);
        let t = advance(profile, "60");
        assert_eq!(t.profile.bmi, Some(22.0));
        assert_eq!(t.profile.bmi_category.as_deref(), Some("Normal"));
        assert_eq!(t.profile.state, OnboardingState::AwaitingCity);
        assert!(t.reply.contains("22.0"));
        assert!(t.reply.contains("Normal"));
    }

    #[test]
    fn city_is_alias_normalized() {
        let mut profile = fresh();
        profile.state = OnboardingState::AwaitingCity;
        let t = advance(profile, "bombay");
        assert_eq!(t.profile.city.as_deref(), Some("Mumbai"));
        assert!(t.reply.contains("Mumbai"));
    }

    #[test]
    fn relation_completes_composite_family_member() {
        let mut profile = fresh();
        profile.state = OnboardingState::AwaitingFamilyRelation;
        profile.family_member_name = Some("Raj".to_string());
        let t = advance(profile, "father");
        assert_eq!(t.profile.family_member.as_deref(), Some("Raj (Parent)"));
        assert_eq!(t.profile.state, OnboardingState::Ready);
        assert!(t.reply.contains("Raj (Parent)"));
    }

    #[test]
    fn full_flow_takes_exactly_seven_answers() {
        let mut profile = fresh();
        // First contact: welcome only, input discarded.
        let t = advance(profile, "hi");
        profile = t.profile;

        let answers = ["Alice", "29", "165", "60", "bombay", "Raj", "father"];
        for answer in answers {
            assert_ne!(profile.state, OnboardingState::Ready);
            let t = advance(profile, answer);
            profile = t.profile;
        }
        assert_eq!(profile.state, OnboardingState::Ready);
        assert_eq!(profile.name.as_deref(), Some("Alice"));
        assert_eq!(profile.age, Some(29));
        assert_eq!(profile.bmi, Some(22.0));
        assert_eq!(profile.city.as_deref(), Some("Mumbai"));
        assert_eq!(profile.family_member.as_deref(), Some("Raj (Parent)"));
    }
}
