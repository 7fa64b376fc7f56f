//! Menu dispatcher
//!
//! Routes ready-state input: numeric menu choices, check-in synonyms, the
//! menu listing, and free-text FAQ questions. The `handled` flag suppresses
//! the generic fallback for anything that already produced a reply this
//! turn.

use crate::content::{
    find_faq_answer, progress_bar, random_hydration_tip, random_recipe, DOCTOR_CONTACT,
    FALLBACK_REPLY, MENU_TEXT, ONBOARDING_VIDEO,
};
use crate::pharmacy::PharmacyDirectory;
use crate::profile::{UserProfile, CHECKIN_CEILING};
use crate::research::KnowledgeHub;

/// Parsed ready-state input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// "menu": list the options
    Menu,
    /// "1": onboarding video link
    Video,
    /// "2": side-effect tips (FAQ entry)
    SideEffects,
    /// "3" or a check-in synonym: weekly check-in action
    CheckIn,
    /// "4": random recipe
    Recipe,
    /// "5": pharmacy lookup for the stored city
    Pharmacy,
    /// "6": knowledge hub research fetches
    Knowledge,
    /// "doctor": expert contact line
    Doctor,
    /// Anything else: FAQ fuzzy match, then generic fallback
    Question,
}

impl MenuChoice {
    /// Case-insensitive parse of trimmed input.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "menu" => Self::Menu,
            "1" => Self::Video,
            "2" => Self::SideEffects,
            "3" | "check-in" | "checkin" | "check in" => Self::CheckIn,
            "4" => Self::Recipe,
            "5" => Self::Pharmacy,
            "6" => Self::Knowledge,
            "doctor" => Self::Doctor,
            _ => Self::Question,
        }
    }
}

/// Ready-state router over the static content and external lookups
pub struct MenuDispatcher {
    pharmacies: PharmacyDirectory,
    knowledge: KnowledgeHub,
}

impl MenuDispatcher {
    pub fn new(pharmacies: PharmacyDirectory, knowledge: KnowledgeHub) -> Self {
        Self {
            pharmacies,
            knowledge,
        }
    }

    /// Handle one ready-state message. Mutates the profile (check-ins) and
    /// returns the reply segments in delivery order.
    pub async fn dispatch(&self, profile: &mut UserProfile, input: &str) -> Vec<String> {
        let choice = MenuChoice::parse(input);

        // The menu listing replies on its own, ahead of the nudge.
        if choice == MenuChoice::Menu {
            return vec![MENU_TEXT.to_string()];
        }

        let mut segments = Vec::new();
        let mut handled = true;

        match choice {
            MenuChoice::Video => segments.push(ONBOARDING_VIDEO.to_string()),
            MenuChoice::SideEffects => {
                // Exact key, always present in the FAQ table.
                if let Some(answer) = find_faq_answer("what are side effects") {
                    segments.push(answer.to_string());
                }
            }
            MenuChoice::CheckIn => segments.push(self.record_checkin(profile)),
            MenuChoice::Recipe => segments.push(random_recipe().to_string()),
            MenuChoice::Pharmacy => {
                segments.push(self.pharmacies.lookup(profile.city.as_deref()));
            }
            MenuChoice::Knowledge => {
                let pubs = self.knowledge.fetch_pubmed().await;
                let trials = self.knowledge.fetch_clinical_trials().await;
                segments.push(format!(
                    "🩺 *Knowledge Hub — PubMed*\n{}",
                    pubs.join("\n\n")
                ));
                segments.push(format!("🧪 *Clinical Trials*\n{}", trials.join("\n\n")));
            }
            MenuChoice::Doctor => segments.push(DOCTOR_CONTACT.to_string()),
            MenuChoice::Menu => unreachable!("handled above"),
            MenuChoice::Question => handled = false,
        }

        if !handled {
            match find_faq_answer(input) {
                Some(answer) => segments.push(answer.to_string()),
                None => segments.push(FALLBACK_REPLY.to_string()),
            }
        }

        // Periodic hydration nudge on every 2nd message, skipped for
        // check-ins (those already carry a tip).
        if profile.message_count % 2 == 0 && choice != MenuChoice::CheckIn {
            segments.push(random_hydration_tip().to_string());
        }

        segments
    }

    /// Check-in action: increment up to the ceiling, render the progress
    /// bar with milestone notes; idempotent once complete.
    fn record_checkin(&self, profile: &mut UserProfile) -> String {
        if profile.checkins >= CHECKIN_CEILING {
            return "✅ You've already completed all 12 weeks! 🎉 Challenge already complete."
                .to_string();
        }

        profile.checkins += 1;
        let mut reply = format!(
            "✅ Check-in recorded! Progress: {} ({}/{} weeks)",
            progress_bar(profile.checkins, CHECKIN_CEILING),
            profile.checkins,
            CHECKIN_CEILING
        );
        if profile.checkins == CHECKIN_CEILING {
            reply.push_str("\n🎉 Challenge complete!");
        } else if profile.checkins == CHECKIN_CEILING / 2 {
            reply.push_str("\n👏 Halfway there!");
        }
        reply.push_str("\n\n");
        reply.push_str(random_hydration_tip());
        reply.push('\n');
        reply.push_str(random_recipe());
        reply
    }
}
