use super::{CountryEntry, PointCategory, VisaDefinition};
use crate::advisor::domain::Purpose;

fn visa(
    purpose: Purpose,
    name: &str,
    description: &str,
    base_score: f64,
    min_funds: u64,
    processing_time: &str,
    points: Vec<PointCategory>,
) -> VisaDefinition {
    VisaDefinition {
        purpose,
        name: name.to_string(),
        description: description.to_string(),
        base_score,
        min_funds,
        spouse_funds: None,
        dependent_funds: None,
        processing_time: processing_time.to_string(),
        points,
    }
}

pub(super) fn countries() -> Vec<CountryEntry> {
    vec![australia(), canada(), united_kingdom()]
}

fn australia() -> CountryEntry {
    CountryEntry {
        name: "Australia".to_string(),
        aliases: Vec::new(),
        requirements: Vec::new(),
        visas: vec![
            visa(
                Purpose::Study,
                "Student Visa (Subclass 500)",
                "For international students to study in Australia",
                0.85,
                21_000,
                "2-4 months",
                vec![
                    PointCategory::new("Language", 20, "English proficiency"),
                    PointCategory::new("Education", 15, "Previous education level"),
                    PointCategory::new("Financial", 15, "Proof of funds"),
                ],
            ),
            visa(
                Purpose::Work,
                "Temporary Skill Shortage Visa",
                "For skilled workers with sponsoring employers",
                0.8,
                25_000,
                "3-6 months",
                vec![
                    PointCategory::new("Work Experience", 25, "Years of experience"),
                    PointCategory::new("Language", 20, "English proficiency"),
                    PointCategory::new("Skills Assessment", 15, "Skills assessment"),
                ],
            ),
            visa(
                Purpose::Permanent,
                "Skilled Independent Visa",
                "Permanent residence for skilled workers",
                0.75,
                30_000,
                "12-16 months",
                vec![
                    PointCategory::new("Age", 30, "Age factor"),
                    PointCategory::new("Education", 20, "Qualification level"),
                    PointCategory::new("Experience", 20, "Work experience"),
                    PointCategory::new("Language", 20, "English proficiency"),
                ],
            ),
        ],
    }
}

fn canada() -> CountryEntry {
    CountryEntry {
        name: "Canada".to_string(),
        aliases: Vec::new(),
        requirements: vec![
            "Language proficiency test".to_string(),
            "Educational credentials assessment".to_string(),
        ],
        visas: vec![
            visa(
                Purpose::Study,
                "Study Permit",
                "Canadian study permit for international students",
                0.85,
                20_000,
                "2-3 months",
                vec![
                    PointCategory::new("Language", 20, "English/French proficiency"),
                    PointCategory::new("Education", 15, "Previous education level"),
                    PointCategory::new("Financial", 15, "Proof of funds"),
                ],
            ),
            visa(
                Purpose::Work,
                "Work Permit",
                "Temporary work permit for skilled workers",
                0.8,
                15_000,
                "2-4 months",
                vec![
                    PointCategory::new("Work Experience", 25, "Years of experience"),
                    PointCategory::new("Language", 20, "Language proficiency"),
                    PointCategory::new("Job Offer", 15, "Valid job offer"),
                ],
            ),
            visa(
                Purpose::Permanent,
                "Express Entry",
                "Permanent residence through Express Entry system",
                0.75,
                25_000,
                "6-8 months",
                vec![
                    PointCategory::new("Age", 12, "Age factor"),
                    PointCategory::new("Education", 25, "Education level"),
                    PointCategory::new("Experience", 15, "Work experience"),
                    PointCategory::new("Language", 28, "Language skills"),
                ],
            ),
        ],
    }
}

fn united_kingdom() -> CountryEntry {
    CountryEntry {
        name: "United Kingdom".to_string(),
        aliases: vec!["UK".to_string(), "Great Britain".to_string()],
        requirements: Vec::new(),
        visas: vec![
            visa(
                Purpose::Study,
                "Student Visa",
                "UK study visa for international students",
                0.85,
                22_000,
                "3-4 weeks",
                vec![
                    PointCategory::new("Language", 20, "English proficiency"),
                    PointCategory::new("Education", 15, "Previous education"),
                    PointCategory::new("Financial", 15, "Maintenance funds"),
                ],
            ),
            visa(
                Purpose::Work,
                "Skilled Worker Visa",
                "For skilled workers with job offers",
                0.8,
                18_000,
                "3-8 weeks",
                vec![
                    PointCategory::new("Job Offer", 20, "Valid job offer"),
                    PointCategory::new("Language", 20, "English proficiency"),
                    PointCategory::new("Experience", 20, "Work experience"),
                ],
            ),
            visa(
                Purpose::Permanent,
                "Indefinite Leave to Remain",
                "Permanent residence in the UK",
                0.75,
                28_000,
                "6 months",
                vec![
                    PointCategory::new("Residency", 25, "Time in UK"),
                    PointCategory::new("Language", 20, "English proficiency"),
                    PointCategory::new("Life in UK", 15, "Life in UK test"),
                ],
            ),
        ],
    }
}
