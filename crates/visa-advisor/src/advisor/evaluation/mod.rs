mod config;
mod funds;
mod policy;
mod rules;

pub use config::{BlendStrategy, ScoringConfig};
pub use rules::{CategoryRule, RuleTable};

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use super::catalog::{CountryEntry, VisaCatalog, VisaDefinition};
use super::domain::Profile;
use super::recommendation::{DependentFunds, Recommendation, RequiredFunds, VisaTypeBreakdown};
use funds::{required_funds, FundsRequirement};
use policy::{
    assess_funds, explain, finalize_score, is_eligible, required_documents, FinancialAssessment,
};

/// Stateless evaluator that applies the rubric to a profile against the catalog.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    catalog: Arc<VisaCatalog>,
    config: ScoringConfig,
    rules: RuleTable,
}

struct VisaEvaluation {
    breakdown: VisaTypeBreakdown,
    funds: FundsRequirement,
    financial: FinancialAssessment,
    processing_time: String,
    score: f64,
}

impl EligibilityEngine {
    pub fn new(catalog: Arc<VisaCatalog>, config: ScoringConfig) -> Self {
        Self {
            catalog,
            config,
            rules: RuleTable::default(),
        }
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn catalog(&self) -> &VisaCatalog {
        &self.catalog
    }

    /// Rank the profile's preferred countries, best score first.
    ///
    /// Countries missing from the catalog, or without a visa for the profile's
    /// purpose, are left out. Equal scores keep preferred-country order.
    pub fn score(&self, profile: &Profile) -> Vec<Recommendation> {
        let mut seen = HashSet::new();
        let mut recommendations = Vec::new();

        for requested in &profile.preferred_countries {
            let Some(country) = self.catalog.lookup(requested) else {
                tracing::debug!(country = %requested, "country not in catalog; skipping");
                continue;
            };
            if !seen.insert(country.name.as_str()) {
                continue;
            }

            match self.recommend_country(country, profile) {
                Some(recommendation) => recommendations.push(recommendation),
                None => tracing::debug!(
                    country = %country.name,
                    purpose = %profile.purpose,
                    "no visa for purpose; skipping"
                ),
            }
        }

        recommendations.sort_by(|left, right| {
            right
                .score
                .partial_cmp(&left.score)
                .unwrap_or(Ordering::Equal)
        });
        recommendations
    }

    fn recommend_country(
        &self,
        country: &CountryEntry,
        profile: &Profile,
    ) -> Option<Recommendation> {
        let evaluations: Vec<VisaEvaluation> = country
            .visas_for(profile.purpose)
            .map(|visa| self.evaluate_visa(visa, profile))
            .collect();

        let mut best = evaluations.first()?;
        for evaluation in &evaluations[1..] {
            if evaluation.score > best.score {
                best = evaluation;
            }
        }

        let score = best.score;
        let funds = best.funds;
        let financial = best.financial;
        let processing_time = best.processing_time.clone();

        tracing::debug!(
            country = %country.name,
            score,
            funds_required = funds.total,
            visas = evaluations.len(),
            "scored country"
        );

        Some(Recommendation {
            name: country.name.clone(),
            score,
            requirements: required_documents(country, profile, funds.total),
            processing_time,
            visa_types: evaluations
                .into_iter()
                .map(|evaluation| evaluation.breakdown)
                .collect(),
            funds_required: funds.total,
            dependent_funds: DependentFunds {
                spouse: funds.spouse,
                per_dependent: funds.per_dependent,
            },
            funds_standing: Some(financial.standing),
            eligibility_reason: explain(profile, &self.config, financial.reason),
            is_eligible: is_eligible(score, &self.config),
        })
    }

    fn evaluate_visa(&self, visa: &VisaDefinition, profile: &Profile) -> VisaEvaluation {
        let (points, point_ratio) = rules::score_points(visa, profile, &self.rules);
        let funds = required_funds(visa, profile, &self.config);
        let financial = assess_funds(profile.available_funds, funds.total, &self.config);

        let blended = self.config.blend.combine(visa.base_score, point_ratio);
        let score = finalize_score(blended + financial.adjustment);

        VisaEvaluation {
            breakdown: VisaTypeBreakdown {
                name: visa.name.clone(),
                description: visa.description.clone(),
                points,
                required_funds: RequiredFunds {
                    base: funds.base,
                    spouse: funds.spouse,
                    per_dependent: if profile.number_of_dependents > 0 {
                        funds.per_dependent
                    } else {
                        0
                    },
                },
            },
            funds,
            financial,
            processing_time: visa.processing_time.clone(),
            score,
        }
    }
}
