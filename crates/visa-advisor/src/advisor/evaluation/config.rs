use serde::{Deserialize, Serialize};

/// How a visa's base score is combined with the profile's point ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BlendStrategy {
    /// `base_weight * base + (1 - base_weight) * points`.
    Average { base_weight: f64 },
    /// `base + points`; saturates at 1.0 for most profiles once clamped.
    Additive,
}

impl BlendStrategy {
    pub fn combine(self, base_score: f64, point_ratio: f64) -> f64 {
        match self {
            BlendStrategy::Average { base_weight } => {
                let weight = base_weight.clamp(0.0, 1.0);
                weight * base_score + (1.0 - weight) * point_ratio
            }
            BlendStrategy::Additive => base_score + point_ratio,
        }
    }
}

impl Default for BlendStrategy {
    fn default() -> Self {
        BlendStrategy::Average { base_weight: 0.5 }
    }
}

/// Tunable constants of the eligibility rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub blend: BlendStrategy,
    pub eligibility_threshold: f64,
    /// Spouse increment as a percentage of the base funds when a visa has none.
    pub spouse_funds_percent: u32,
    /// Per-dependent increment as a percentage of the base funds when a visa has none.
    pub dependent_funds_percent: u32,
    pub strong_funds_multiplier: f64,
    pub strong_funds_bonus: f64,
    pub sufficient_funds_bonus: f64,
    pub insufficient_funds_penalty: f64,
    /// Fields of study called out in the explanation; they never change the score.
    pub in_demand_fields: Vec<String>,
}

impl ScoringConfig {
    pub fn with_blend(blend: BlendStrategy) -> Self {
        Self {
            blend,
            ..Self::default()
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            blend: BlendStrategy::default(),
            eligibility_threshold: 0.6,
            spouse_funds_percent: 30,
            dependent_funds_percent: 20,
            strong_funds_multiplier: 1.5,
            strong_funds_bonus: 0.15,
            sufficient_funds_bonus: 0.05,
            insufficient_funds_penalty: 0.10,
            in_demand_fields: ["engineering", "healthcare", "information technology", "science"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}
