use serde::{Deserialize, Serialize};

use crate::scoring::UserFinancialInput;

/// Identifier wrapper for stored leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Inbound form submission: the financial figures plus where the lead came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    #[serde(flatten)]
    pub input: UserFinancialInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<UserFinancialInput> for LeadSubmission {
    fn from(input: UserFinancialInput) -> Self {
        Self {
            input,
            source: None,
        }
    }
}

/// Lifecycle of a lead between scoring and delivery of generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Scored and cleared for automatic delivery.
    Scored,
    /// Held for a human because a review flag fired.
    PendingReview,
    Approved,
    Rejected,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::Scored => "scored",
            LeadStatus::PendingReview => "pending_review",
            LeadStatus::Approved => "approved",
            LeadStatus::Rejected => "rejected",
        }
    }

    /// Cleared for the delivery pipeline.
    pub const fn is_deliverable(self) -> bool {
        matches!(self, LeadStatus::Scored | LeadStatus::Approved)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, LeadStatus::Approved | LeadStatus::Rejected)
    }
}

/// Reason a lead needs manual sign-off before anything is sent to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewFlag {
    MonthlyInvestmentAboveLimit { amount: f64, limit: f64 },
    RetirementContributionAboveLimit { amount: f64, limit: f64 },
    MissingContactEmail,
}

impl ReviewFlag {
    pub fn summary(&self) -> String {
        match self {
            ReviewFlag::MonthlyInvestmentAboveLimit { amount, limit } => format!(
                "suggested monthly investment {:.0} exceeds review limit {:.0}",
                amount, limit
            ),
            ReviewFlag::RetirementContributionAboveLimit { amount, limit } => format!(
                "suggested retirement contribution {:.0} exceeds review limit {:.0}",
                amount, limit
            ),
            ReviewFlag::MissingContactEmail => "lead has no contact e-mail".to_string(),
        }
    }
}
