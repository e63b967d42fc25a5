use super::super::catalog::CountryEntry;
use super::super::domain::{EducationLevel, LanguageBand, Profile};
use super::super::recommendation::FundsStanding;
use super::config::ScoringConfig;

/// Score adjustment derived from how available funds cover the requirement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FinancialAssessment {
    pub adjustment: f64,
    pub standing: FundsStanding,
    pub reason: &'static str,
}

pub(crate) fn assess_funds(
    available: u64,
    required: u64,
    config: &ScoringConfig,
) -> FinancialAssessment {
    let available = available as f64;
    let required = required as f64;

    if available >= required * config.strong_funds_multiplier {
        FinancialAssessment {
            adjustment: config.strong_funds_bonus,
            standing: FundsStanding::Strong,
            reason: "Strong financial position",
        }
    } else if available >= required {
        FinancialAssessment {
            adjustment: config.sufficient_funds_bonus,
            standing: FundsStanding::Sufficient,
            reason: "Meets minimum financial requirements",
        }
    } else {
        FinancialAssessment {
            adjustment: -config.insufficient_funds_penalty,
            standing: FundsStanding::Insufficient,
            reason: "Additional funds may be required",
        }
    }
}

/// Clamp to `[0, 1]` and round to two decimals.
pub(crate) fn finalize_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    (raw.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

pub(crate) fn is_eligible(score: f64, config: &ScoringConfig) -> bool {
    score >= config.eligibility_threshold
}

/// Human-readable explanation; purely descriptive, never feeds the score.
pub(crate) fn explain(profile: &Profile, config: &ScoringConfig, financial_reason: &str) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if (25..=35).contains(&profile.age) {
        reasons.push("Age is within optimal range (25-35)".to_string());
    }

    match profile.education {
        EducationLevel::Phd => {
            reasons.push("PhD qualification provides additional points".to_string())
        }
        EducationLevel::Masters => reasons.push("Master's degree is highly valued".to_string()),
        _ => {}
    }

    let field = profile.field_of_study.to_ascii_lowercase();
    if config
        .in_demand_fields
        .iter()
        .any(|demand| field.contains(demand.as_str()))
    {
        reasons.push("In-demand field of study".to_string());
    }

    if profile.work_experience >= 5 {
        reasons.push("Extensive work experience (5+ years)".to_string());
    } else if profile.work_experience >= 3 {
        reasons.push("Good work experience (3+ years)".to_string());
    }

    if profile.language_band() == LanguageBand::Advanced
        || profile
            .language_score
            .to_ascii_lowercase()
            .contains("proficient")
    {
        reasons.push("Strong language proficiency".to_string());
    }

    reasons.push(financial_reason.to_string());
    reasons.join(". ")
}

/// Documents the applicant should prepare for `country`.
pub(crate) fn required_documents(
    country: &CountryEntry,
    profile: &Profile,
    funds_required: u64,
) -> Vec<String> {
    let mut documents = vec![
        "Valid passport".to_string(),
        "Clean criminal record".to_string(),
        "Medical examination clearance".to_string(),
    ];
    documents.extend(country.requirements.iter().cloned());
    documents.push(format!("Minimum funds required: {funds_required}"));

    if profile.spouse_included {
        documents.push("Spouse's passport and documentation".to_string());
    }
    if profile.number_of_dependents > 0 {
        documents.push(format!(
            "Documentation for {} dependent(s)",
            profile.number_of_dependents
        ));
    }

    documents
}
