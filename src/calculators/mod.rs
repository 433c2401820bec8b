pub mod page;
pub mod selectors;
pub mod table;

pub use page::EmiCalculatorPage;
pub use table::{AmortizationRow, AmortizationTable};

use crate::browser::MenuItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the loan-amount calculator's tenure is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenureUnit {
    Yearly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculatorVariant {
    CarLoan,
    HomeLoan,
    PersonalLoan,
    LoanAmount(TenureUnit),
    LoanTenure,
    InterestRate,
}

const LANDING: &[MenuItem] = &[];
const HOME_LOAN_SECTION: &[MenuItem] = &[
    MenuItem::LoanCalculatorsAndWidgets,
    MenuItem::HomeLoanEmiCalculator,
];
const LOAN_CALCULATOR_SECTION: &[MenuItem] = &[
    MenuItem::LoanCalculatorsAndWidgets,
    MenuItem::LoanCalculator,
];

impl CalculatorVariant {
    pub const ALL: [CalculatorVariant; 7] = [
        CalculatorVariant::CarLoan,
        CalculatorVariant::HomeLoan,
        CalculatorVariant::PersonalLoan,
        CalculatorVariant::LoanAmount(TenureUnit::Yearly),
        CalculatorVariant::LoanAmount(TenureUnit::Monthly),
        CalculatorVariant::LoanTenure,
        CalculatorVariant::InterestRate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CalculatorVariant::CarLoan => "car loan",
            CalculatorVariant::HomeLoan => "home loan",
            CalculatorVariant::PersonalLoan => "personal loan",
            CalculatorVariant::LoanAmount(TenureUnit::Yearly) => "loan amount (yearly tenure)",
            CalculatorVariant::LoanAmount(TenureUnit::Monthly) => "loan amount (monthly tenure)",
            CalculatorVariant::LoanTenure => "loan tenure",
            CalculatorVariant::InterestRate => "interest rate",
        }
    }

    /// Menu path from the landing page; empty when the calculator lives on the landing page.
    pub fn section(&self) -> &'static [MenuItem] {
        match self {
            CalculatorVariant::CarLoan => LANDING,
            CalculatorVariant::HomeLoan => HOME_LOAN_SECTION,
            _ => LOAN_CALCULATOR_SECTION,
        }
    }

    pub fn requires_navigation(&self) -> bool {
        !self.section().is_empty()
    }

    pub fn required_fields(&self) -> &'static [LoanField] {
        match self {
            CalculatorVariant::CarLoan
            | CalculatorVariant::HomeLoan
            | CalculatorVariant::PersonalLoan => {
                &[LoanField::Amount, LoanField::Interest, LoanField::Term]
            }
            CalculatorVariant::LoanAmount(TenureUnit::Yearly) => {
                &[LoanField::Emi, LoanField::Interest, LoanField::TermYear]
            }
            CalculatorVariant::LoanAmount(TenureUnit::Monthly) => {
                &[LoanField::Emi, LoanField::Interest, LoanField::TermMonth]
            }
            CalculatorVariant::LoanTenure => &[LoanField::Amount, LoanField::Emi, LoanField::Interest],
            CalculatorVariant::InterestRate => &[LoanField::Amount, LoanField::Emi, LoanField::Term],
        }
    }

    pub fn yields_breakdown(&self) -> bool {
        !matches!(
            self,
            CalculatorVariant::LoanTenure | CalculatorVariant::InterestRate
        )
    }

    pub fn has_amortization_table(&self) -> bool {
        matches!(self, CalculatorVariant::HomeLoan)
    }
}

impl fmt::Display for CalculatorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanField {
    Amount,
    Interest,
    Term,
    TermYear,
    TermMonth,
    Emi,
}

impl LoanField {
    pub fn label(&self) -> &'static str {
        match self {
            LoanField::Amount => "amount",
            LoanField::Interest => "interest",
            LoanField::Term => "term",
            LoanField::TermYear => "termYear",
            LoanField::TermMonth => "termMonth",
            LoanField::Emi => "emi",
        }
    }
}

/// Display-ready field values. `None` leaves the page's value untouched,
/// `Some("")` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanInput {
    pub amount: Option<String>,
    pub interest: Option<String>,
    pub term: Option<String>,
    pub term_year: Option<String>,
    pub term_month: Option<String>,
    pub emi: Option<String>,
}

impl LoanInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: LoanField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            LoanField::Amount => self.amount = value,
            LoanField::Interest => self.interest = value,
            LoanField::Term => self.term = value,
            LoanField::TermYear => self.term_year = value,
            LoanField::TermMonth => self.term_month = value,
            LoanField::Emi => self.emi = value,
        }
        self
    }

    pub fn value(&self, field: LoanField) -> Option<&str> {
        match field {
            LoanField::Amount => self.amount.as_deref(),
            LoanField::Interest => self.interest.as_deref(),
            LoanField::Term => self.term.as_deref(),
            // Yearly entry falls back to the generic term.
            LoanField::TermYear => self.term_year.as_deref().or(self.term.as_deref()),
            LoanField::TermMonth => self.term_month.as_deref(),
            LoanField::Emi => self.emi.as_deref(),
        }
    }
}

/// First-period principal/interest split, exactly as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub principal: String,
    pub interest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarResult {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CalculatorResult {
    Breakdown(Breakdown),
    Scalar(ScalarResult),
}

impl CalculatorResult {
    pub fn as_breakdown(&self) -> Option<&Breakdown> {
        match self {
            CalculatorResult::Breakdown(b) => Some(b),
            CalculatorResult::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarResult> {
        match self {
            CalculatorResult::Scalar(s) => Some(s),
            CalculatorResult::Breakdown(_) => None,
        }
    }

    /// Every display string the result carries.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            CalculatorResult::Breakdown(b) => vec![b.principal.as_str(), b.interest.as_str()],
            CalculatorResult::Scalar(s) => vec![s.text.as_str()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScenarioState {
    Idle,
    Navigated,
    Filled,
    Read,
    Done,
}
