//! Static keyword tables that connect causes, categories and skills.
//!
//! There is no synonym resolver. Two differently spelled interests only
//! meet through these tables.

use crate::text::{loosely_contains, split_words};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cause category → words that signal it.
pub const CAUSE_KEYWORDS: &[(&str, &[&str])] = &[
    ("education", &["education", "school", "learn", "teach", "student", "literacy", "training", "skills", "knowledge", "academic"]),
    ("healthcare", &["health", "medical", "hospital", "doctor", "nurse", "clinic", "medicine", "treatment", "care", "wellness"]),
    ("environment", &["environment", "nature", "green", "climate", "pollution", "conservation", "tree", "plant", "ecology", "sustainable"]),
    ("hunger relief", &["hunger", "food", "meal", "nutrition", "feed", "kitchen", "dining", "nourishment", "starvation", "famine"]),
    ("animal welfare", &["animal", "pet", "wildlife", "rescue", "shelter", "veterinary", "species", "creature", "fauna", "habitat"]),
    ("women empowerment", &["women", "girl", "female", "mother", "empowerment", "gender", "equality", "rights", "safety", "support"]),
    ("child welfare", &["child", "children", "kid", "orphan", "infant", "youth", "minor", "adolescent", "baby", "toddler"]),
    ("elderly care", &["elderly", "senior", "aged", "old", "retirement", "geriatric", "care home", "nursing", "pension"]),
    ("poverty alleviation", &["poverty", "poor", "underprivileged", "slum", "homeless", "destitute", "needy", "livelihood", "income"]),
    ("disaster relief", &["disaster", "emergency", "relief", "rescue", "flood", "earthquake", "cyclone", "crisis", "calamity"]),
    ("rural development", &["rural", "village", "farmer", "agriculture", "farming", "countryside", "community", "development"]),
    ("technology", &["technology", "digital", "computer", "internet", "coding", "software", "innovation", "tech", "it"]),
    ("arts & culture", &["art", "culture", "music", "dance", "theater", "heritage", "tradition", "creative", "performance"]),
    ("sports", &["sport", "game", "fitness", "athletic", "play", "exercise", "physical", "recreation", "competition"]),
];

/// Volunteer skill → cause words it is useful for.
pub const SKILL_KEYWORDS: &[(&str, &[&str])] = &[
    ("teaching", &["education", "training", "skills development"]),
    ("medical", &["healthcare", "wellness"]),
    ("counseling", &["mental health", "support", "guidance"]),
    ("fundraising", &["donation", "finance", "resources"]),
    ("marketing", &["awareness", "outreach", "communication"]),
    ("event management", &["organization", "coordination", "planning"]),
    ("social media", &["digital", "online", "awareness"]),
    ("photography", &["documentation", "media", "creative"]),
    ("cooking", &["food", "nutrition", "meal preparation"]),
    ("coding", &["technology", "digital literacy"]),
    ("writing", &["content", "communication", "documentation"]),
    ("design", &["creative", "visual", "branding"]),
];

/// Cause category → skills that category typically asks volunteers for.
pub const CATEGORY_SKILLS: &[(&str, &[&str])] = &[
    ("education", &["teaching", "tutoring", "mentoring", "training", "curriculum", "public speaking", "writing"]),
    ("healthcare", &["medical", "nursing", "first aid", "counseling", "pharmacy", "healthcare"]),
    ("environment", &["gardening", "conservation", "recycling", "research", "photography"]),
    ("hunger relief", &["cooking", "logistics", "food handling", "distribution", "event management"]),
    ("animal welfare", &["animal care", "veterinary", "rescue", "fostering", "grooming"]),
    ("women empowerment", &["counseling", "legal", "mentoring", "training", "advocacy"]),
    ("child welfare", &["teaching", "mentoring", "childcare", "counseling", "storytelling"]),
    ("elderly care", &["caregiving", "nursing", "companionship", "counseling", "medical"]),
    ("poverty alleviation", &["fundraising", "community outreach", "microfinance", "vocational training", "social work"]),
    ("disaster relief", &["first aid", "logistics", "rescue", "medical", "coordination"]),
    ("rural development", &["agriculture", "farming", "construction", "community outreach", "teaching"]),
    ("technology", &["programming", "coding", "web development", "software", "data analysis", "it support", "digital literacy"]),
    ("arts & culture", &["art", "music", "dance", "design", "photography", "writing", "performance"]),
    ("sports", &["coaching", "fitness", "sports", "physical training", "first aid"]),
];

static CATEGORY_SKILL_INDEX: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| CATEGORY_SKILLS.iter().copied().collect());

/// Skills a category asks for, if the category is known.
pub fn category_skills(category: &str) -> Option<&'static [&'static str]> {
    CATEGORY_SKILL_INDEX.get(category).copied()
}

/// Detect which cause categories a single interest token refers to.
///
/// A token names a category when it contains the category name, or when
/// one of its words (or a multi-word phrase) is among that category's
/// signal words. Results follow table order.
///
/// # Example
/// ```
/// use impactmatch_matching::keywords::detect_categories;
///
/// assert_eq!(detect_categories("Education"), vec!["education"]);
/// assert_eq!(detect_categories("village schools"), vec!["rural development"]);
/// ```
pub fn detect_categories(token: &str) -> Vec<&'static str> {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return Vec::new();
    }
    let words = split_words(&token);

    CAUSE_KEYWORDS
        .iter()
        .filter(|(category, signals)| {
            token.contains(category)
                || signals.iter().any(|signal| {
                    if signal.contains(' ') {
                        token.contains(signal)
                    } else {
                        words.iter().any(|word| word == signal)
                    }
                })
        })
        .map(|(category, _)| *category)
        .collect()
}

/// Extract known skills (keys of [`SKILL_KEYWORDS`]) mentioned in free text.
///
/// Used when a profile has no explicit skills field, and to read an NGO's
/// needs out of its interests.
pub fn extract_known_skills(text: &str) -> Vec<String> {
    let words = split_words(text);
    if words.is_empty() {
        return Vec::new();
    }

    SKILL_KEYWORDS
        .iter()
        .map(|(skill, _)| *skill)
        .filter(|skill| words.iter().any(|word| loosely_contains(word, skill)))
        .map(String::from)
        .collect()
}
