use crate::error::{HarnessError, Result};
use once_cell::sync::OnceCell;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

const PERCENTAGE_PATTERN: &str = r"(\d+(?:\.\d+)?)%";
const TENURE_PATTERN: &str = r"(?i)(\d+)\s*(years?|yrs?|months?|mos?)";

static PERCENTAGE: OnceCell<Regex> = OnceCell::new();
static TENURE: OnceCell<Regex> = OnceCell::new();

fn compiled(cell: &'static OnceCell<Regex>, pattern: &str) -> Result<&'static Regex> {
    cell.get_or_try_init(|| Regex::new(pattern))
        .map_err(|e| HarnessError::Parse(e.to_string()))
}

pub fn is_currency_display(text: &str) -> bool {
    text.contains('₹')
}

/// Whether `text` carries a percentage written as `<number>%`, with no gap before the sign.
pub fn is_percentage_display(text: &str) -> Result<bool> {
    Ok(compiled(&PERCENTAGE, PERCENTAGE_PATTERN)?.is_match(text))
}

/// Parses a rupee display string.
/// Examples: "₹ 0", "₹1,20,000", "₹ 45,000.50", "Rs. 1,500"
pub fn parse_rupee_amount(text: &str) -> Result<Decimal> {
    let cleaned: String = text
        .replace('₹', "")
        .replace("Rs.", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(HarnessError::Parse(format!("no amount in '{}'", text)));
    }

    Decimal::from_str(&cleaned)
        .map_err(|e| HarnessError::Parse(format!("'{}' is not an amount: {}", text, e)))
}

/// Extracts the first percentage from a display string ("10.5%", "Interest Rate10.25%").
pub fn parse_percentage(text: &str) -> Result<Decimal> {
    let captures = compiled(&PERCENTAGE, PERCENTAGE_PATTERN)?
        .captures(text)
        .ok_or_else(|| HarnessError::Parse(format!("no percentage in '{}'", text)))?;

    Decimal::from_str(&captures[1])
        .map_err(|e| HarnessError::Parse(format!("'{}': {}", text, e)))
}

/// Total months in a composite tenure string such as "Loan Tenure36months"
/// or "Loan Tenure 3 years 2 months".
pub fn parse_tenure_months(text: &str) -> Result<u32> {
    let mut total: u32 = 0;
    let mut found = false;

    let overflow = || HarnessError::Parse(format!("tenure in '{}' is out of range", text));
    for captures in compiled(&TENURE, TENURE_PATTERN)?.captures_iter(text) {
        let value: u32 = captures[1]
            .parse()
            .map_err(|e| HarnessError::Parse(format!("'{}': {}", text, e)))?;
        let months = if captures[2].to_lowercase().starts_with('y') {
            value.checked_mul(12).ok_or_else(overflow)?
        } else {
            value
        };
        total = total.checked_add(months).ok_or_else(overflow)?;
        found = true;
    }

    if !found {
        return Err(HarnessError::Parse(format!("no tenure in '{}'", text)));
    }
    Ok(total)
}
