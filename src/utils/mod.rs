pub mod parser;

pub use parser::{
    is_currency_display, is_percentage_display, parse_percentage, parse_rupee_amount,
    parse_tenure_months,
};
