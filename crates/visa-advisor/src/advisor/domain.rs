use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Self-reported immigration profile as submitted by the questionnaire.
///
/// Numeric fields accept JSON numbers or strings; anything that does not read
/// as a non-negative whole number becomes `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "whole_number")]
    pub age: u32,
    #[serde(default)]
    pub education: EducationLevel,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default, deserialize_with = "whole_number")]
    pub work_experience: u32,
    #[serde(default)]
    pub language_score: String,
    #[serde(default, deserialize_with = "whole_number")]
    pub available_funds: u64,
    #[serde(default)]
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub spouse_included: bool,
    #[serde(default, deserialize_with = "whole_number")]
    pub number_of_dependents: u32,
    pub purpose: Purpose,
    #[serde(default)]
    pub preferred_countries: Vec<String>,
}

impl Profile {
    pub fn language_band(&self) -> LanguageBand {
        LanguageBand::from(self.language_score.as_str())
    }
}

/// Highest completed education level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum EducationLevel {
    HighSchool,
    Bachelors,
    Masters,
    Phd,
    #[default]
    Other,
}

impl From<&str> for EducationLevel {
    fn from(raw: &str) -> Self {
        let value = raw.trim().to_ascii_lowercase();
        if value.contains("phd") {
            Self::Phd
        } else if value.contains("masters") {
            Self::Masters
        } else if value.contains("bachelors") {
            Self::Bachelors
        } else if value.contains("high-school") || value.contains("high school") {
            Self::HighSchool
        } else {
            Self::Other
        }
    }
}

impl From<String> for EducationLevel {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "high-school",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::Masters => "masters",
            EducationLevel::Phd => "phd",
            EducationLevel::Other => "other",
        }
    }
}

/// Language proficiency band derived from the free-text language score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageBand {
    Basic,
    Intermediate,
    Advanced,
}

impl From<&str> for LanguageBand {
    fn from(raw: &str) -> Self {
        let value = raw.to_ascii_lowercase();
        if value.contains("advanced") {
            Self::Advanced
        } else if value.contains("intermediate") {
            Self::Intermediate
        } else {
            Self::Basic
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl MaritalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Divorced => "divorced",
            MaritalStatus::Widowed => "widowed",
            MaritalStatus::Unspecified => "unspecified",
        }
    }
}

impl From<&str> for MaritalStatus {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "single" => Self::Single,
            "married" => Self::Married,
            "divorced" => Self::Divorced,
            "widowed" => Self::Widowed,
            _ => Self::Unspecified,
        }
    }
}

/// Reason for immigrating; selects which visa of a country applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Study,
    Work,
    Permanent,
}

impl Purpose {
    pub const ALL: [Purpose; 3] = [Purpose::Study, Purpose::Work, Purpose::Permanent];

    pub const fn label(self) -> &'static str {
        match self {
            Purpose::Study => "study",
            Purpose::Work => "work",
            Purpose::Permanent => "permanent",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown immigration purpose '{0}' (expected study, work or permanent)")]
pub struct UnknownPurpose(pub String);

impl FromStr for Purpose {
    type Err = UnknownPurpose;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "study" => Ok(Self::Study),
            "work" => Ok(Self::Work),
            "permanent" | "permanent residence" => Ok(Self::Permanent),
            other => Err(UnknownPurpose(other.to_string())),
        }
    }
}

/// Reads a leading whole number the way a form field would be coerced:
/// `"30"`, `"30 years"` and `30.9` give 30, everything else gives `None`.
pub(crate) fn parse_whole_number(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(serde_json::Value::Number(number)) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite() && *float >= 0.0)
                .map(|float| float.trunc() as u64)
        }),
        Some(serde_json::Value::String(text)) => parse_whole_number(&text),
        _ => None,
    };

    Ok(parsed
        .and_then(|number| T::try_from(number).ok())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_fields_accept_strings_and_degrade_to_zero() {
        let profile: Profile = serde_json::from_value(json!({
            "age": "31",
            "education": "masters",
            "workExperience": "abc",
            "languageScore": "Advanced (IELTS 8)",
            "availableFunds": -200,
            "numberOfDependents": "2 kids",
            "purpose": "work",
            "preferredCountries": ["Canada"]
        }))
        .expect("profile parses");

        assert_eq!(profile.age, 31);
        assert_eq!(profile.work_experience, 0);
        assert_eq!(profile.available_funds, 0);
        assert_eq!(profile.number_of_dependents, 2);
        assert_eq!(profile.education, EducationLevel::Masters);
        assert_eq!(profile.language_band(), LanguageBand::Advanced);
        assert_eq!(profile.marital_status, MaritalStatus::Unspecified);
    }

    #[test]
    fn unknown_education_and_marital_status_fall_back() {
        let profile: Profile = serde_json::from_value(json!({
            "education": "apprenticeship",
            "maritalStatus": "it's complicated",
            "purpose": "study"
        }))
        .expect("profile parses");

        assert_eq!(profile.education, EducationLevel::Other);
        assert_eq!(profile.marital_status, MaritalStatus::Unspecified);
        assert_eq!(profile.age, 0);
        assert!(profile.preferred_countries.is_empty());
    }

    #[test]
    fn language_band_reads_free_text() {
        assert_eq!(LanguageBand::from("Advanced C1"), LanguageBand::Advanced);
        assert_eq!(LanguageBand::from("proficient"), LanguageBand::Basic);
        assert_eq!(LanguageBand::from("Intermediate B2"), LanguageBand::Intermediate);
        assert_eq!(LanguageBand::from("6.5"), LanguageBand::Basic);
    }

    #[test]
    fn purpose_parses_labels() {
        assert_eq!("Permanent".parse::<Purpose>(), Ok(Purpose::Permanent));
        assert!("tourism".parse::<Purpose>().is_err());
    }
}
