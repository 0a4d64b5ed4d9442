use serde::{Deserialize, Serialize};

/// Validated submission handed to the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFinancialInput {
    pub personal_details: PersonalDetails,
    pub expenses_assets: ExpensesAssets,
    pub retirement_planning: RetirementPlanning,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_allocation: Option<BudgetAllocation>,
}

impl UserFinancialInput {
    /// Salary plus passive income streams.
    pub fn gross_annual_income(&self) -> f64 {
        self.personal_details.annual_income + self.passive_annual_income()
    }

    pub fn passive_annual_income(&self) -> f64 {
        self.personal_details.income_from_interest + self.personal_details.income_from_property
    }

    /// Assets that compound: brokerage holdings plus retirement accounts.
    pub fn invested_assets(&self) -> f64 {
        self.expenses_assets.total_investments
            + self.retirement_planning.current_retirement_savings
    }

    pub fn years_to_retirement(&self) -> u8 {
        self.retirement_planning
            .retirement_age
            .saturating_sub(self.personal_details.age)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub age: u8,
    pub annual_income: f64,
    #[serde(default)]
    pub income_from_interest: f64,
    #[serde(default)]
    pub income_from_property: f64,
    /// Bureau score; only the simple variant reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesAssets {
    pub monthly_expenses: f64,
    pub emergency_funds: f64,
    pub savings: f64,
    pub total_debt: f64,
    pub total_investments: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlanning {
    pub retirement_age: u8,
    pub target_retirement_savings: f64,
    pub current_retirement_savings: f64,
    #[serde(default)]
    pub adjust_for_inflation: bool,
}

/// Lead contact details. Carried alongside the figures, never scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// Percentage split of take-home spending. Also used for signed deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    pub essentials: f64,
    pub discretionary: f64,
    pub savings: f64,
}

/// Selects which generation of the scoring rules runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringVariant {
    /// Benchmark-aware rules with growth projection. Canonical.
    #[default]
    FullProfile,
    /// Legacy six-metric rules kept for compatibility with older submissions.
    Simple,
}

impl ScoringVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" | "full_profile" | "full-profile" => Some(Self::FullProfile),
            "simple" | "legacy" => Some(Self::Simple),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoringVariant::FullProfile => "full_profile",
            ScoringVariant::Simple => "simple",
        }
    }
}

/// How the improvement-potential score was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementBasis {
    WeightedShortfall,
    ComplementOfOverall,
}

impl From<ScoringVariant> for ImprovementBasis {
    fn from(variant: ScoringVariant) -> Self {
        match variant {
            ScoringVariant::FullProfile => ImprovementBasis::WeightedShortfall,
            ScoringVariant::Simple => ImprovementBasis::ComplementOfOverall,
        }
    }
}
