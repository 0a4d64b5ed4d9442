use serde::{Deserialize, Serialize};

use super::domain::BudgetAllocation;

/// Reference table every calculator and normalizer reads its thresholds from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Benchmarks {
    /// The bracket with the highest `min_age` at or below the age wins; order in
    /// the table does not matter.
    pub age_brackets: Vec<AgeBenchmark>,
    pub flat_savings_target_pct: f64,
    pub emergency_fund_target_months: f64,
    pub dti: DtiPolicy,
    pub retirement: RetirementAssumptions,
    pub growth_opportunity: GrowthOpportunityPolicy,
    pub improvement_weights: ImprovementWeights,
    pub reference_allocation: BudgetAllocation,
    pub credit_score_full_marks: u16,
    pub investment_horizon_months: u32,
    pub baseline_investment_pct: f64,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self {
            age_brackets: vec![
                AgeBenchmark {
                    min_age: 0,
                    savings_rate_target_pct: 15.0,
                    investment_multiple: 0.25,
                },
                AgeBenchmark {
                    min_age: 30,
                    savings_rate_target_pct: 20.0,
                    investment_multiple: 1.0,
                },
                AgeBenchmark {
                    min_age: 40,
                    savings_rate_target_pct: 30.0,
                    investment_multiple: 2.5,
                },
                AgeBenchmark {
                    min_age: 50,
                    savings_rate_target_pct: 30.0,
                    investment_multiple: 5.0,
                },
            ],
            flat_savings_target_pct: 20.0,
            emergency_fund_target_months: 6.0,
            dti: DtiPolicy::default(),
            retirement: RetirementAssumptions::default(),
            growth_opportunity: GrowthOpportunityPolicy::default(),
            improvement_weights: ImprovementWeights::default(),
            reference_allocation: BudgetAllocation {
                essentials: 50.0,
                discretionary: 30.0,
                savings: 20.0,
            },
            credit_score_full_marks: 700,
            investment_horizon_months: 60,
            baseline_investment_pct: 10.0,
        }
    }
}

impl Benchmarks {
    pub fn bracket_for(&self, age: u8) -> AgeBenchmark {
        self.age_brackets
            .iter()
            .filter(|bracket| bracket.min_age <= age)
            .max_by_key(|bracket| bracket.min_age)
            .or_else(|| self.age_brackets.iter().min_by_key(|bracket| bracket.min_age))
            .copied()
            .unwrap_or(AgeBenchmark::FALLBACK)
    }
}

/// Savings and investment expectations for one age band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBenchmark {
    pub min_age: u8,
    pub savings_rate_target_pct: f64,
    /// Invested assets expected as a multiple of annual income.
    pub investment_multiple: f64,
}

impl AgeBenchmark {
    const FALLBACK: AgeBenchmark = AgeBenchmark {
        min_age: 0,
        savings_rate_target_pct: 20.0,
        investment_multiple: 1.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DtiPolicy {
    /// DTI percentage at which the score bottoms out.
    pub floor_ratio_pct: f64,
    pub floor_score: f64,
}

impl Default for DtiPolicy {
    fn default() -> Self {
        Self {
            floor_ratio_pct: 40.0,
            floor_score: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetirementAssumptions {
    pub growth_rate: f64,
    pub inflation_rate: f64,
    /// Fraction of the annual surplus assumed to flow into retirement accounts.
    pub projected_contribution_share: f64,
}

impl Default for RetirementAssumptions {
    fn default() -> Self {
        Self {
            growth_rate: 0.05,
            inflation_rate: 0.03,
            projected_contribution_share: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrowthOpportunityPolicy {
    /// `(minimum shortfall fraction, score)`, checked in descending order.
    pub shortfall_steps: Vec<(f64, u8)>,
    pub low_income_threshold: f64,
    pub low_income_cap: u8,
}

impl Default for GrowthOpportunityPolicy {
    fn default() -> Self {
        Self {
            shortfall_steps: vec![(0.75, 100), (0.5, 75), (0.25, 50), (0.0, 25)],
            low_income_threshold: 30_000.0,
            low_income_cap: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImprovementWeights {
    pub emergency_fund: f64,
    pub savings: f64,
    pub dti: f64,
}

impl Default for ImprovementWeights {
    fn default() -> Self {
        Self {
            emergency_fund: 0.3,
            savings: 0.3,
            dti: 0.4,
        }
    }
}
