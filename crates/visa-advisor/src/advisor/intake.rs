use super::domain::{EducationLevel, MaritalStatus, Profile};

/// Validation errors raised before a profile is stored.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("age is required")]
    MissingAge,
    #[error("education level is required")]
    MissingEducation,
    #[error("language score is required")]
    MissingLanguageScore,
    #[error("select at least one preferred country")]
    NoPreferredCountries,
    #[error("a spouse can only be included when marital status is married (found {0})")]
    SpouseWithoutMarriage(&'static str),
}

/// Guard applying the questionnaire's required-field rules at intake.
///
/// Scoring itself never validates; this only gates what is persisted.
#[derive(Debug, Clone, Default)]
pub struct ProfileGuard;

impl ProfileGuard {
    /// Check required fields and return a cleaned copy of the profile.
    pub fn accept(&self, mut profile: Profile) -> Result<Profile, ProfileViolation> {
        if profile.age == 0 {
            return Err(ProfileViolation::MissingAge);
        }
        if profile.education == EducationLevel::Other {
            return Err(ProfileViolation::MissingEducation);
        }

        profile.language_score = profile.language_score.trim().to_string();
        if profile.language_score.is_empty() {
            return Err(ProfileViolation::MissingLanguageScore);
        }

        profile.preferred_countries = profile
            .preferred_countries
            .into_iter()
            .map(|country| country.trim().to_string())
            .filter(|country| !country.is_empty())
            .collect();
        if profile.preferred_countries.is_empty() {
            return Err(ProfileViolation::NoPreferredCountries);
        }

        if profile.spouse_included && profile.marital_status != MaritalStatus::Married {
            return Err(ProfileViolation::SpouseWithoutMarriage(
                profile.marital_status.label(),
            ));
        }

        profile.field_of_study = profile.field_of_study.trim().to_string();
        Ok(profile)
    }
}
