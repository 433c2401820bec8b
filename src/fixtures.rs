use crate::calculators::{CalculatorVariant, LoanInput};
use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixture file with one input record per calculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanData {
    #[serde(default)]
    pub car_loan: LoanInput,
    #[serde(default)]
    pub home_loan: LoanInput,
    #[serde(default)]
    pub personal_loan: LoanInput,
    #[serde(default)]
    pub loan_amount_calc: LoanInput,
    #[serde(default)]
    pub loan_tenure_calc: LoanInput,
    #[serde(default)]
    pub interest_rate_calc: LoanInput,
}

impl LoanData {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HarnessError::Fixture(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| HarnessError::Fixture(e.to_string()))
    }

    /// Both loan-amount tenure modes share one record.
    pub fn for_variant(&self, variant: CalculatorVariant) -> &LoanInput {
        match variant {
            CalculatorVariant::CarLoan => &self.car_loan,
            CalculatorVariant::HomeLoan => &self.home_loan,
            CalculatorVariant::PersonalLoan => &self.personal_loan,
            CalculatorVariant::LoanAmount(_) => &self.loan_amount_calc,
            CalculatorVariant::LoanTenure => &self.loan_tenure_calc,
            CalculatorVariant::InterestRate => &self.interest_rate_calc,
        }
    }
}
