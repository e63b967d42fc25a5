use std::collections::HashMap;
use std::ops::RangeInclusive;

use super::super::catalog::VisaDefinition;
use super::super::domain::{EducationLevel, LanguageBand, Profile};
use super::super::recommendation::ScoredPoint;

const OPTIMAL_AGE: RangeInclusive<u32> = 25..=35;

/// Point allocation strategy for a visa category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRule {
    Age,
    Education,
    Experience,
    Language,
    /// Flat 60% for categories the profile carries no data for.
    Fallback,
}

impl CategoryRule {
    pub fn score(self, available: u32, profile: &Profile) -> u32 {
        let percent = match self {
            CategoryRule::Age => {
                if OPTIMAL_AGE.contains(&profile.age) {
                    100
                } else {
                    60
                }
            }
            CategoryRule::Education => match profile.education {
                EducationLevel::Phd => 100,
                EducationLevel::Masters => 80,
                EducationLevel::Bachelors => 60,
                EducationLevel::HighSchool | EducationLevel::Other => 30,
            },
            CategoryRule::Experience => match profile.work_experience {
                years if years >= 5 => 100,
                years if years >= 3 => 70,
                _ => 40,
            },
            CategoryRule::Language => match profile.language_band() {
                LanguageBand::Advanced => 100,
                LanguageBand::Intermediate => 70,
                LanguageBand::Basic => 40,
            },
            CategoryRule::Fallback => 60,
        };
        share(available, percent)
    }
}

/// Floor of `available * percent / 100`, never above `available`.
fn share(available: u32, percent: u32) -> u32 {
    let scaled = u64::from(available) * u64::from(percent.min(100)) / 100;
    scaled as u32
}

/// Category name to rule lookup; names are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: HashMap<String, CategoryRule>,
}

impl RuleTable {
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register an additional category name, e.g. `"IELTS"` as a language rule.
    pub fn with_alias(mut self, category: &str, rule: CategoryRule) -> Self {
        self.rules.insert(category.trim().to_ascii_lowercase(), rule);
        self
    }

    pub fn rule_for(&self, category: &str) -> CategoryRule {
        self.rules
            .get(&category.trim().to_ascii_lowercase())
            .copied()
            .unwrap_or(CategoryRule::Fallback)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::empty()
            .with_alias("age", CategoryRule::Age)
            .with_alias("education", CategoryRule::Education)
            .with_alias("work experience", CategoryRule::Experience)
            .with_alias("experience", CategoryRule::Experience)
            .with_alias("language", CategoryRule::Language)
            .with_alias("english level", CategoryRule::Language)
    }
}

/// Annotate each category of `visa` and return the earned/available ratio.
pub(crate) fn score_points(
    visa: &VisaDefinition,
    profile: &Profile,
    rules: &RuleTable,
) -> (Vec<ScoredPoint>, f64) {
    let points: Vec<ScoredPoint> = visa
        .points
        .iter()
        .map(|point| ScoredPoint {
            category: point.category.clone(),
            available: point.available,
            details: point.details.clone(),
            scored: rules
                .rule_for(&point.category)
                .score(point.available, profile),
        })
        .collect();

    let earned: u64 = points.iter().map(|point| u64::from(point.scored)).sum();
    let available: u64 = points.iter().map(|point| u64::from(point.available)).sum();
    let ratio = if available == 0 {
        0.0
    } else {
        earned as f64 / available as f64
    };

    (points, ratio)
}
