use super::super::catalog::VisaDefinition;
use super::super::domain::Profile;
use super::config::ScoringConfig;

/// Funds a household needs for one visa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FundsRequirement {
    pub base: u64,
    pub spouse: u64,
    pub per_dependent: u64,
    pub dependents: u64,
    pub total: u64,
}

fn percent_of(amount: u64, percent: u32) -> u64 {
    (u128::from(amount) * u128::from(percent) / 100).min(u128::from(u64::MAX)) as u64
}

pub(crate) fn required_funds(
    visa: &VisaDefinition,
    profile: &Profile,
    config: &ScoringConfig,
) -> FundsRequirement {
    let base = visa.min_funds;
    let spouse = if profile.spouse_included {
        visa.spouse_funds
            .unwrap_or_else(|| percent_of(base, config.spouse_funds_percent))
    } else {
        0
    };
    let per_dependent = visa
        .dependent_funds
        .unwrap_or_else(|| percent_of(base, config.dependent_funds_percent));
    let dependents = per_dependent.saturating_mul(u64::from(profile.number_of_dependents));
    let total = base.saturating_add(spouse).saturating_add(dependents);

    FundsRequirement {
        base,
        spouse,
        per_dependent,
        dependents,
        total,
    }
}
