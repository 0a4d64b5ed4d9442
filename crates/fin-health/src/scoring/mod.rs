//! Financial health scoring engine.
//!
//! Raw submission figures flow through metric calculators, score normalizers and
//! the aggregate scorer, then into the recommendation generator. Everything here
//! is synchronous and pure: no I/O, no logging, no clock.

mod aggregate;
pub mod benchmarks;
pub mod domain;
pub mod metrics;
pub mod normalize;
mod profile;
mod recommendations;

#[cfg(test)]
pub(crate) mod tests;

pub use aggregate::overall_health_score;
pub use benchmarks::{AgeBenchmark, Benchmarks};
pub use domain::{
    BudgetAllocation, ContactInfo, ExpensesAssets, ImprovementBasis, PersonalDetails,
    RetirementPlanning, ScoringVariant, UserFinancialInput,
};
pub use profile::{FinancialProfile, RawMetrics, ScoreSet};
pub use recommendations::Recommendations;

/// Stateless engine that applies one benchmark table and rule generation to
/// submissions.
#[derive(Debug, Clone, Default)]
pub struct FinancialScoringEngine {
    benchmarks: Benchmarks,
    variant: ScoringVariant,
}

impl FinancialScoringEngine {
    pub fn new(benchmarks: Benchmarks, variant: ScoringVariant) -> Self {
        Self {
            benchmarks,
            variant,
        }
    }

    pub fn benchmarks(&self) -> &Benchmarks {
        &self.benchmarks
    }

    pub fn variant(&self) -> ScoringVariant {
        self.variant
    }

    pub fn scores(&self, input: &UserFinancialInput) -> ScoreSet {
        let raw = profile::compute_metrics(input, &self.benchmarks, self.variant);
        profile::score_metrics(input, &raw, &self.benchmarks, self.variant)
    }

    pub fn profile(&self, input: &UserFinancialInput) -> FinancialProfile {
        let metrics = profile::compute_metrics(input, &self.benchmarks, self.variant);
        let scores = profile::score_metrics(input, &metrics, &self.benchmarks, self.variant);
        let recommendations = recommendations::recommend(input, &self.benchmarks, self.variant);

        FinancialProfile {
            variant: self.variant,
            metrics,
            scores,
            recommendations,
        }
    }
}

/// Score a submission with the default benchmarks and canonical rules.
pub fn calculate_financial_scores(input: &UserFinancialInput) -> ScoreSet {
    FinancialScoringEngine::default().scores(input)
}

/// Build the full profile with the default benchmarks and canonical rules.
pub fn calculate_complete_financial_profile(input: &UserFinancialInput) -> FinancialProfile {
    FinancialScoringEngine::default().profile(input)
}
