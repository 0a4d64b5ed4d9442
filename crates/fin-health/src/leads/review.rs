use serde::{Deserialize, Serialize};

use super::domain::ReviewFlag;
use crate::scoring::{FinancialProfile, UserFinancialInput};

const DEFAULT_MAX_MONTHLY_INVESTMENT: f64 = 1_500.0;
const DEFAULT_MAX_RETIREMENT_CONTRIBUTION: f64 = 2_000.0;

/// Thresholds above which generated advice must be signed off by a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPolicy {
    max_monthly_investment: f64,
    max_monthly_retirement_contribution: Option<f64>,
    require_contact_email: bool,
}

impl ReviewPolicy {
    pub fn new(max_monthly_investment: f64) -> Self {
        Self {
            max_monthly_investment: sanitize_limit(
                max_monthly_investment,
                DEFAULT_MAX_MONTHLY_INVESTMENT,
            ),
            max_monthly_retirement_contribution: Some(DEFAULT_MAX_RETIREMENT_CONTRIBUTION),
            require_contact_email: true,
        }
    }

    pub fn with_retirement_limit(mut self, limit: Option<f64>) -> Self {
        self.max_monthly_retirement_contribution =
            limit.map(|value| sanitize_limit(value, DEFAULT_MAX_RETIREMENT_CONTRIBUTION));
        self
    }

    pub fn with_contact_email_required(mut self, required: bool) -> Self {
        self.require_contact_email = required;
        self
    }

    pub fn max_monthly_investment(&self) -> f64 {
        self.max_monthly_investment
    }

    pub fn max_monthly_retirement_contribution(&self) -> Option<f64> {
        self.max_monthly_retirement_contribution
    }
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MONTHLY_INVESTMENT)
    }
}

fn sanitize_limit(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Decides whether a scored lead can go straight to delivery.
#[derive(Debug, Clone, Default)]
pub struct ReviewGate {
    policy: ReviewPolicy,
}

impl ReviewGate {
    pub fn with_policy(policy: ReviewPolicy) -> Self {
        Self { policy }
    }

    /// Flags raised for this lead. Empty means no human sign-off is needed.
    pub fn assess(&self, input: &UserFinancialInput, profile: &FinancialProfile) -> Vec<ReviewFlag> {
        let mut flags = Vec::new();
        let recommendations = &profile.recommendations;

        if recommendations.monthly_investment > self.policy.max_monthly_investment {
            flags.push(ReviewFlag::MonthlyInvestmentAboveLimit {
                amount: recommendations.monthly_investment,
                limit: self.policy.max_monthly_investment,
            });
        }

        if let Some(limit) = self.policy.max_monthly_retirement_contribution {
            if recommendations.monthly_retirement_contribution > limit {
                flags.push(ReviewFlag::RetirementContributionAboveLimit {
                    amount: recommendations.monthly_retirement_contribution,
                    limit,
                });
            }
        }

        if self.policy.require_contact_email && input.contact_info.email.trim().is_empty() {
            flags.push(ReviewFlag::MissingContactEmail);
        }

        flags
    }
}
