use serde::{Deserialize, Serialize};

/// Point category annotated with the points a profile earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub category: String,
    pub available: u32,
    pub details: String,
    pub scored: u32,
}

/// Funds a single visa asks for, split by household member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredFunds {
    pub base: u64,
    pub spouse: u64,
    pub per_dependent: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentFunds {
    pub spouse: u64,
    pub per_dependent: u64,
}

/// Scoring breakdown for one visa pathway of a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaTypeBreakdown {
    pub name: String,
    pub description: String,
    pub points: Vec<ScoredPoint>,
    pub required_funds: RequiredFunds,
}

/// How the applicant's funds compare to the total requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundsStanding {
    Strong,
    Sufficient,
    Insufficient,
}

impl FundsStanding {
    pub const fn label(self) -> &'static str {
        match self {
            FundsStanding::Strong => "strong",
            FundsStanding::Sufficient => "sufficient",
            FundsStanding::Insufficient => "insufficient",
        }
    }
}

/// Ranked output item for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub processing_time: String,
    #[serde(default)]
    pub visa_types: Vec<VisaTypeBreakdown>,
    #[serde(default)]
    pub funds_required: u64,
    #[serde(default)]
    pub dependent_funds: DependentFunds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funds_standing: Option<FundsStanding>,
    #[serde(default)]
    pub eligibility_reason: String,
    pub is_eligible: bool,
}

impl Recommendation {
    /// One-line summary for CLI output and logs.
    pub fn summary(&self) -> String {
        let verdict = if self.is_eligible {
            "eligible"
        } else {
            "not eligible"
        };
        let visas = self
            .visa_types
            .iter()
            .map(|visa| visa.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} ({:.2}, {verdict}): {visas}; funds required {}",
            self.name, self.score, self.funds_required
        )
    }
}
