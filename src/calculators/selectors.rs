//! emicalculator.net locators.
//!
//! Everything in here is coupled to the site's current DOM. The positional
//! indices in [`result_shape`] in particular have no semantic meaning beyond
//! render order and must be re-checked whenever the site changes.

use crate::browser::{KeyTarget, Selector};
use crate::calculators::{CalculatorVariant, LoanField, TenureUnit};

pub struct EmiSelectors;

impl EmiSelectors {
    // Calculator tabs
    pub const CAR_LOAN_TAB: Selector = Selector::Css("#car-loan");
    pub const LOAN_AMOUNT_CALC_TAB: Selector = Selector::Css("#loan-amount-calc");
    pub const LOAN_TENURE_CALC_TAB: Selector = Selector::Css("#loan-tenure-calc");
    pub const INTEREST_RATE_CALC_TAB: Selector = Selector::Css("#interest-rate-calc");

    // Fields shared by the landing page and the loan calculator page
    pub const LOAN_AMOUNT: Selector = Selector::Css("#loanamount");
    pub const LOAN_INTEREST: Selector = Selector::Css("#loaninterest");
    pub const LOAN_TERM: Selector = Selector::Css("#loanterm");
    pub const LOAN_EMI: Selector = Selector::Css("#loanemi");
    pub const MONTH_TOGGLE: Selector = Selector::Css("label[for='loanmonths']");

    // Home loan EMI calculator
    pub const HOME_PRICE: Selector = Selector::Css("#homeprice");
    pub const HOME_LOAN_INTEREST: Selector = Selector::Css("#homeloaninterest");
    pub const HOME_LOAN_TERM: Selector = Selector::Css("#homeloanterm");

    // Results
    pub const PRINCIPAL_AMOUNT: Selector = Selector::Css("#emipaymenttable td:nth-child(2)");
    pub const INTEREST_AMOUNT: Selector = Selector::Css("#emipaymenttable td:nth-child(3)");
    pub const MONTHLY_PAYMENT: Selector = Selector::Css(".monthlypaymentdetails td.currency");
    pub const LOAN_SUMMARY_TENURE: Selector = Selector::Css("#loansummary-tenure");
    pub const LOAN_SUMMARY_INTEREST_RATE: Selector = Selector::Css("#loansummary-interestrate");

    // Amortization table
    pub const TABLE_HEADERS: Selector = Selector::XPath("//table//th");
    pub const PAYMENT_ROWS: Selector = Selector::Css(".yearlypaymentdetails");
    pub const PAYMENT_CELLS: Selector = Selector::Css("td");
}

/// One scripted interaction of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStep {
    Click(Selector),
    Field(Selector, LoanField),
    Commit(KeyTarget),
}

const CAR_LOAN: &[FillStep] = &[
    FillStep::Click(EmiSelectors::CAR_LOAN_TAB),
    FillStep::Field(EmiSelectors::LOAN_AMOUNT, LoanField::Amount),
    FillStep::Field(EmiSelectors::LOAN_INTEREST, LoanField::Interest),
    FillStep::Field(EmiSelectors::LOAN_TERM, LoanField::Term),
    FillStep::Commit(KeyTarget::Element(EmiSelectors::LOAN_TERM)),
];

const HOME_LOAN: &[FillStep] = &[
    FillStep::Field(EmiSelectors::HOME_PRICE, LoanField::Amount),
    FillStep::Field(EmiSelectors::HOME_LOAN_INTEREST, LoanField::Interest),
    FillStep::Field(EmiSelectors::HOME_LOAN_TERM, LoanField::Term),
    FillStep::Commit(KeyTarget::Focused),
];

const PERSONAL_LOAN: &[FillStep] = &[
    FillStep::Field(EmiSelectors::LOAN_AMOUNT, LoanField::Amount),
    FillStep::Field(EmiSelectors::LOAN_INTEREST, LoanField::Interest),
    FillStep::Field(EmiSelectors::LOAN_TERM, LoanField::Term),
    FillStep::Commit(KeyTarget::Element(EmiSelectors::LOAN_TERM)),
];

const LOAN_AMOUNT_YEARLY: &[FillStep] = &[
    FillStep::Click(EmiSelectors::LOAN_AMOUNT_CALC_TAB),
    FillStep::Field(EmiSelectors::LOAN_EMI, LoanField::Emi),
    FillStep::Field(EmiSelectors::LOAN_INTEREST, LoanField::Interest),
    FillStep::Field(EmiSelectors::LOAN_TERM, LoanField::TermYear),
    FillStep::Commit(KeyTarget::Element(EmiSelectors::LOAN_TERM)),
];

const LOAN_AMOUNT_MONTHLY: &[FillStep] = &[
    FillStep::Click(EmiSelectors::LOAN_AMOUNT_CALC_TAB),
    FillStep::Field(EmiSelectors::LOAN_EMI, LoanField::Emi),
    FillStep::Field(EmiSelectors::LOAN_INTEREST, LoanField::Interest),
    FillStep::Click(EmiSelectors::MONTH_TOGGLE),
    FillStep::Field(EmiSelectors::LOAN_TERM, LoanField::TermMonth),
    FillStep::Commit(KeyTarget::Element(EmiSelectors::LOAN_TERM)),
];

const LOAN_TENURE: &[FillStep] = &[
    FillStep::Click(EmiSelectors::LOAN_TENURE_CALC_TAB),
    FillStep::Field(EmiSelectors::LOAN_AMOUNT, LoanField::Amount),
    FillStep::Field(EmiSelectors::LOAN_EMI, LoanField::Emi),
    FillStep::Field(EmiSelectors::LOAN_INTEREST, LoanField::Interest),
    FillStep::Commit(KeyTarget::Element(EmiSelectors::LOAN_INTEREST)),
];

const INTEREST_RATE: &[FillStep] = &[
    FillStep::Click(EmiSelectors::INTEREST_RATE_CALC_TAB),
    FillStep::Field(EmiSelectors::LOAN_AMOUNT, LoanField::Amount),
    FillStep::Field(EmiSelectors::LOAN_EMI, LoanField::Emi),
    FillStep::Field(EmiSelectors::LOAN_TERM, LoanField::Term),
    FillStep::Commit(KeyTarget::Element(EmiSelectors::LOAN_TERM)),
];

/// Ordered interactions that fill `variant`; always ends with its commit.
pub fn fill_plan(variant: CalculatorVariant) -> &'static [FillStep] {
    match variant {
        CalculatorVariant::CarLoan => CAR_LOAN,
        CalculatorVariant::HomeLoan => HOME_LOAN,
        CalculatorVariant::PersonalLoan => PERSONAL_LOAN,
        CalculatorVariant::LoanAmount(TenureUnit::Yearly) => LOAN_AMOUNT_YEARLY,
        CalculatorVariant::LoanAmount(TenureUnit::Monthly) => LOAN_AMOUNT_MONTHLY,
        CalculatorVariant::LoanTenure => LOAN_TENURE,
        CalculatorVariant::InterestRate => INTEREST_RATE,
    }
}

/// The `index`-th element matching `selector`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSlot {
    pub selector: Selector,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakdownSlots {
    pub first_month_principal: ResultSlot,
    pub first_month_interest: ResultSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Breakdown(BreakdownSlots),
    Scalar(ResultSlot),
}

const SHARED_BREAKDOWN: BreakdownSlots = BreakdownSlots {
    first_month_principal: ResultSlot {
        selector: EmiSelectors::PRINCIPAL_AMOUNT,
        index: 2,
    },
    first_month_interest: ResultSlot {
        selector: EmiSelectors::INTEREST_AMOUNT,
        index: 3,
    },
};

const HOME_LOAN_BREAKDOWN: BreakdownSlots = BreakdownSlots {
    first_month_principal: ResultSlot {
        selector: EmiSelectors::MONTHLY_PAYMENT,
        index: 0,
    },
    first_month_interest: ResultSlot {
        selector: EmiSelectors::MONTHLY_PAYMENT,
        index: 1,
    },
};

/// Where each variant renders its result. The only place positional indices live.
pub fn result_shape(variant: CalculatorVariant) -> ResultShape {
    match variant {
        CalculatorVariant::HomeLoan => ResultShape::Breakdown(HOME_LOAN_BREAKDOWN),
        CalculatorVariant::CarLoan
        | CalculatorVariant::PersonalLoan
        | CalculatorVariant::LoanAmount(_) => ResultShape::Breakdown(SHARED_BREAKDOWN),
        CalculatorVariant::LoanTenure => ResultShape::Scalar(ResultSlot {
            selector: EmiSelectors::LOAN_SUMMARY_TENURE,
            index: 0,
        }),
        CalculatorVariant::InterestRate => ResultShape::Scalar(ResultSlot {
            selector: EmiSelectors::LOAN_SUMMARY_INTEREST_RATE,
            index: 0,
        }),
    }
}
