use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::LeadSubmission;
use crate::scoring::{
    ContactInfo, ExpensesAssets, PersonalDetails, RetirementPlanning, UserFinancialInput,
};

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead export: {}", err),
            LeadImportError::Csv(err) => write!(f, "invalid lead CSV data: {}", err),
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads flat, one-row-per-lead CSV exports from the form backend.
pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LeadSubmission>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LeadSubmission>, LeadImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut submissions = Vec::new();
        for row in csv_reader.deserialize::<LeadRow>() {
            submissions.push(row?.into_submission());
        }
        Ok(submissions)
    }
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    age: u8,
    annual_income: f64,
    #[serde(default, deserialize_with = "empty_as_zero")]
    income_from_interest: f64,
    #[serde(default, deserialize_with = "empty_as_zero")]
    income_from_property: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    credit_score: Option<String>,
    monthly_expenses: f64,
    #[serde(default, deserialize_with = "empty_as_zero")]
    emergency_funds: f64,
    #[serde(default, deserialize_with = "empty_as_zero")]
    savings: f64,
    #[serde(default, deserialize_with = "empty_as_zero")]
    total_debt: f64,
    #[serde(default, deserialize_with = "empty_as_zero")]
    total_investments: f64,
    retirement_age: u8,
    #[serde(default, deserialize_with = "empty_as_zero")]
    target_retirement_savings: f64,
    #[serde(default, deserialize_with = "empty_as_zero")]
    current_retirement_savings: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    adjust_for_inflation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
}

impl LeadRow {
    fn into_submission(self) -> LeadSubmission {
        let input = UserFinancialInput {
            personal_details: PersonalDetails {
                age: self.age,
                annual_income: self.annual_income,
                income_from_interest: self.income_from_interest,
                income_from_property: self.income_from_property,
                credit_score: self
                    .credit_score
                    .as_deref()
                    .and_then(|value| value.parse().ok()),
            },
            expenses_assets: ExpensesAssets {
                monthly_expenses: self.monthly_expenses,
                emergency_funds: self.emergency_funds,
                savings: self.savings,
                total_debt: self.total_debt,
                total_investments: self.total_investments,
            },
            retirement_planning: RetirementPlanning {
                retirement_age: self.retirement_age,
                target_retirement_savings: self.target_retirement_savings,
                current_retirement_savings: self.current_retirement_savings,
                adjust_for_inflation: self
                    .adjust_for_inflation
                    .as_deref()
                    .map(parse_flag)
                    .unwrap_or(false),
            },
            contact_info: ContactInfo {
                email: self.email.unwrap_or_default(),
                name: self.name.unwrap_or_default(),
                phone: self.phone.unwrap_or_default(),
            },
            budget_allocation: None,
        };

        LeadSubmission {
            input,
            source: self.source,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn empty_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        None => Ok(0.0),
        Some(value) => value
            .parse::<f64>()
            .map_err(|err| serde::de::Error::custom(format!("invalid amount {value:?}: {err}"))),
    }
}
