//! Static bot content
//!
//! FAQ table, recipes, hydration tips and the menu text, plus the fuzzy
//! FAQ matcher and the adherence progress bar. All user-visible strings
//! live here so the engine and dispatcher stay free of copy.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

/// FAQ entries: lowercase question key, reply text.
pub static FAQS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        (
            "what are side effects",
            "🤒 Common side effects: nausea, vomiting, constipation. Ginger tea + small meals help.\n(Type 'doctor' to connect to our experts)",
        ),
        ("how to store wegovy", "🧊 Store in fridge (2-8°C). Do not freeze."),
        (
            "can i take it at night",
            "🕒 Yes, morning or night — keep your schedule consistent.",
        ),
        (
            "what to do if i miss a dose",
            "💉 If <5 days late: take as soon as you remember. If >5 days: skip and continue your normal schedule.",
        ),
        (
            "how to reduce nausea",
            "🍵 Ginger tea, small frequent meals, avoid greasy food, stay hydrated.",
        ),
        (
            "when will i see weight loss",
            "📊 Usually between 4–8 weeks, varies by patient.",
        ),
        ("can i exercise", "🏃 Yes — combine diet + exercise for best results."),
        (
            "who should not take wegovy",
            "⚠️ Those with thyroid cancer history or MEN2 syndrome should avoid. Consult doctor.",
        ),
        (
            "what is the price",
            "💰 Price varies by pharmacy. Type 'doctor' to ask clinical or cost queries.",
        ),
        (
            "can i drink alcohol",
            "🍷 Light alcohol is usually safe, but avoid if it worsens nausea.",
        ),
    ]
});

pub static RECIPES: &[&str] = &[
    "🥗 Quick recipe: Cucumber & tomato salad with lemon and olive oil — light and filling.",
    "🍲 Lentil & veggie soup: protein-rich and gentle on the stomach.",
    "🥣 Overnight oats with chia: easy digestion & sustained energy.",
];

pub static HYDRATION_TIPS: &[&str] = &[
    "💧 Tip: sip water throughout the day — small, frequent sips reduce nausea.",
    "🥤 Try an electrolyte drink if you feel light-headed after injections.",
];

pub const DOCTOR_CONTACT: &str =
    "👩‍⚕️ Connect to an expert here: https://example.com/connect-doctor";

pub const ONBOARDING_VIDEO: &str =
    "📹 Watch the onboarding video here:\nhttps://www.dropbox.com/scl/fi/kgizm8vb8uhdqlaxswqfx/onboarding.mp4?rlkey=7f5krq9j630jd8n2wp5fohypc&st=9eaijrh8&dl=1";

pub const MENU_TEXT: &str = "📌 *Main Menu*\n\n\
    1️⃣ Onboarding Video\n\
    2️⃣ Side-effect Tips\n\
    3️⃣ Weekly Check-in\n\
    4️⃣ Recipe\n\
    5️⃣ Pharmacy Locator\n\
    6️⃣ Knowledge Hub\n\n\
    Reply with a number (1-6), or just ask me your question!";

pub const FALLBACK_REPLY: &str =
    "🤔 Sorry, I didn't get that. Type 'menu' to see options or ask me anything about Wegovy.";

pub const STORE_UNAVAILABLE_REPLY: &str = "⚠️ Temporary DB error. Please try again in a moment.";

pub const FAULT_REPLY: &str = "⚠️ Oops — server error. Please type 'menu' to continue.";

/// Minimum normalized similarity for a FAQ hit. Permissive enough for
/// partial phrasing ("side effects?" still lands on the full question).
const FAQ_SIMILARITY_CUTOFF: f64 = 0.4;

/// Best single FAQ answer for a free-text question, if any key clears the
/// similarity cutoff. Query and keys are compared lowercased.
pub fn find_faq_answer(query: &str) -> Option<&'static str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    FAQS.iter()
        .map(|(key, answer)| (strsim::normalized_levenshtein(&query, key), *answer))
        .filter(|(score, _)| *score >= FAQ_SIMILARITY_CUTOFF)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, answer)| answer)
}

/// 10-tick adherence bar scaled from checkins/total, e.g. ▰▰▰▰▰▱▱▱▱▱.
pub fn progress_bar(checkins: u32, total: u32) -> String {
    if total == 0 {
        return "▱".repeat(10);
    }
    let filled = ((checkins.min(total) as f64 / total as f64) * 10.0) as usize;
    "▰".repeat(filled) + &"▱".repeat(10 - filled)
}

pub fn random_recipe() -> &'static str {
    RECIPES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(RECIPES[0])
}

pub fn random_hydration_tip() -> &'static str {
    HYDRATION_TIPS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(HYDRATION_TIPS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_faq_key_matches() {
        let answer = find_faq_answer("what are side effects").unwrap();
        assert!(answer.contains("side effects"));
    }

    #[test]
    fn partial_phrasing_still_matches() {
        assert!(find_faq_answer("what are the side effects?").is_some());
        assert!(find_faq_answer("how to store wegovy?").is_some());
    }

    #[test]
    fn unrelated_text_does_not_match() {
        assert!(find_faq_answer("zzzzqqqq").is_none());
        assert!(find_faq_answer("").is_none());
    }

    #[test]
    fn single_best_match_wins() {
        // Close to exactly one key even though several share words.
        let answer = find_faq_answer("when will i see weight loss").unwrap();
        assert!(answer.contains("4–8 weeks"));
    }

    #[test]
    fn progress_bar_scales_to_ten_ticks() {
        assert_eq!(progress_bar(0, 12), "▱▱▱▱▱▱▱▱▱▱");
        assert_eq!(progress_bar(6, 12), "▰▰▰▰▰▱▱▱▱▱");
        assert_eq!(progress_bar(12, 12), "▰▰▰▰▰▰▰▰▰▰");
    }

    #[test]
    fn progress_bar_clamps_over_total() {
        assert_eq!(progress_bar(20, 12), "▰▰▰▰▰▰▰▰▰▰");
    }
}
