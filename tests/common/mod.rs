#![allow(dead_code)]

use async_trait::async_trait;
use emi_harness::browser::{KeyTarget, MenuItem, Page, Selector};
use emi_harness::calculators::selectors::EmiSelectors;
use emi_harness::config::Config;
use emi_harness::HarnessError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Goto(String),
    Click(Selector, usize),
    Fill(Selector, String),
    Enter(KeyTarget),
    Close,
}

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub text: String,
    pub cells: Vec<String>,
    visible_at: Instant,
}

impl FakeElement {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cells: Vec::new(),
            visible_at: Instant::now(),
        }
    }

    pub fn row(cells: Vec<String>) -> Self {
        Self {
            text: cells.join("\t"),
            cells,
            visible_at: Instant::now(),
        }
    }
}

/// What the page model sees when a commit lands.
pub struct SiteView<'a> {
    pub fields: &'a HashMap<Selector, String>,
    pub active_tab: Option<Selector>,
    pub monthly_tenure: bool,
}

impl SiteView<'_> {
    pub fn field(&self, selector: Selector) -> Option<&str> {
        self.fields.get(&selector).map(|s| s.as_str())
    }

    pub fn number(&self, selector: Selector) -> f64 {
        self.field(selector)
            .and_then(|s| s.replace(',', "").trim().parse().ok())
            .unwrap_or(0.0)
    }
}

type CommitModel = Arc<dyn Fn(&SiteView<'_>) -> Vec<(Selector, Vec<FakeElement>)> + Send + Sync>;

struct SiteState {
    elements: HashMap<Selector, Vec<FakeElement>>,
    reveals: HashMap<Selector, Vec<Selector>>,
    fields: HashMap<Selector, String>,
    focused: Option<Selector>,
    active_tab: Option<Selector>,
    monthly_tenure: bool,
    reachable: bool,
    ready_state: String,
    settle_delay: Duration,
    actions: Vec<Action>,
    model: Option<CommitModel>,
    closed: bool,
}

/// In-memory stand-in for the calculator site. Clones share state, so a test
/// keeps a handle for inspection after handing one to the controller.
#[derive(Clone)]
pub struct FakeSite {
    state: Arc<Mutex<SiteState>>,
}

impl FakeSite {
    pub fn blank() -> Self {
        Self {
            state: Arc::new(Mutex::new(SiteState {
                elements: HashMap::new(),
                reveals: HashMap::new(),
                fields: HashMap::new(),
                focused: None,
                active_tab: None,
                monthly_tenure: false,
                reachable: true,
                ready_state: "complete".to_string(),
                settle_delay: Duration::ZERO,
                actions: Vec::new(),
                model: None,
                closed: false,
            })),
        }
    }

    pub fn with_elements(self, selector: Selector, elements: Vec<FakeElement>) -> Self {
        self.state.lock().unwrap().elements.insert(selector, elements);
        self
    }

    pub fn present(self, selector: Selector) -> Self {
        self.with_elements(selector, vec![FakeElement::text("")])
    }

    /// Clicking `trigger` makes `revealed` appear.
    pub fn reveals(self, trigger: Selector, revealed: &[Selector]) -> Self {
        self.state
            .lock()
            .unwrap()
            .reveals
            .insert(trigger, revealed.to_vec());
        self
    }

    pub fn with_model<F>(self, model: F) -> Self
    where
        F: Fn(&SiteView<'_>) -> Vec<(Selector, Vec<FakeElement>)> + Send + Sync + 'static,
    {
        self.state.lock().unwrap().model = Some(Arc::new(model));
        self
    }

    pub fn with_settle_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().settle_delay = delay;
        self
    }

    pub fn unreachable(self) -> Self {
        self.state.lock().unwrap().reachable = false;
        self
    }

    pub fn stuck_loading(self) -> Self {
        self.state.lock().unwrap().ready_state = "loading".to_string();
        self
    }

    pub fn actions(&self) -> Vec<Action> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn field(&self, selector: Selector) -> Option<String> {
        self.state.lock().unwrap().fields.get(&selector).cloned()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }

    pub fn set_elements(&self, selector: Selector, elements: Vec<FakeElement>) {
        self.state.lock().unwrap().elements.insert(selector, elements);
    }

    fn visible(state: &SiteState, selector: Selector) -> Vec<FakeElement> {
        let now = Instant::now();
        state
            .elements
            .get(&selector)
            .map(|all| {
                all.iter()
                    .filter(|e| e.visible_at <= now)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn require(state: &SiteState, selector: Selector, index: usize) -> Result<(), HarnessError> {
        if Self::visible(state, selector).len() > index {
            Ok(())
        } else {
            Err(HarnessError::ElementNotFound {
                what: format!("{} [{}]", selector, index),
                waited_ms: 0,
            })
        }
    }
}

fn is_tab(selector: Selector) -> bool {
    [
        EmiSelectors::CAR_LOAN_TAB,
        EmiSelectors::LOAN_AMOUNT_CALC_TAB,
        EmiSelectors::LOAN_TENURE_CALC_TAB,
        EmiSelectors::INTEREST_RATE_CALC_TAB,
    ]
    .contains(&selector)
}

#[async_trait]
impl Page for FakeSite {
    async fn goto(&self, url: &str) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        state.actions.push(Action::Goto(url.to_string()));
        if !state.reachable {
            return Err(HarnessError::Navigation(format!("{}: connection refused", url)));
        }
        Ok(())
    }

    async fn ready_state(&self) -> Result<String, HarnessError> {
        Ok(self.state.lock().unwrap().ready_state.clone())
    }

    async fn count(&self, selector: Selector) -> Result<usize, HarnessError> {
        let state = self.state.lock().unwrap();
        Ok(Self::visible(&state, selector).len())
    }

    async fn click(&self, selector: Selector, index: usize) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        Self::require(&state, selector, index)?;
        state.actions.push(Action::Click(selector, index));

        if is_tab(selector) {
            state.active_tab = Some(selector);
            state.monthly_tenure = false;
        }
        if selector == EmiSelectors::MONTH_TOGGLE {
            state.monthly_tenure = true;
        }
        if let Some(revealed) = state.reveals.get(&selector).cloned() {
            for target in revealed {
                state
                    .elements
                    .entry(target)
                    .or_insert_with(|| vec![FakeElement::text("")]);
            }
        }
        Ok(())
    }

    async fn fill(&self, selector: Selector, value: &str) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        Self::require(&state, selector, 0)?;
        state.actions.push(Action::Fill(selector, value.to_string()));
        state.fields.insert(selector, value.to_string());
        state.focused = Some(selector);
        Ok(())
    }

    async fn press_enter(&self, target: KeyTarget) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        if let KeyTarget::Element(selector) = target {
            Self::require(&state, selector, 0)?;
        }
        state.actions.push(Action::Enter(target));

        let Some(model) = state.model.clone() else {
            return Ok(());
        };
        let outputs = {
            let view = SiteView {
                fields: &state.fields,
                active_tab: state.active_tab,
                monthly_tenure: state.monthly_tenure,
            };
            model(&view)
        };
        let visible_at = Instant::now() + state.settle_delay;
        for (selector, mut elements) in outputs {
            for element in &mut elements {
                element.visible_at = visible_at;
            }
            state.elements.insert(selector, elements);
        }
        Ok(())
    }

    async fn text_content(
        &self,
        selector: Selector,
        index: usize,
    ) -> Result<Option<String>, HarnessError> {
        let state = self.state.lock().unwrap();
        Ok(Self::visible(&state, selector)
            .get(index)
            .map(|e| format!("\n    {}  ", e.text)))
    }

    async fn inner_texts(&self, selector: Selector) -> Result<Vec<String>, HarnessError> {
        let state = self.state.lock().unwrap();
        Ok(Self::visible(&state, selector)
            .into_iter()
            .map(|e| e.text)
            .collect())
    }

    async fn row_cells(
        &self,
        row: Selector,
        _cell: Selector,
    ) -> Result<Vec<Vec<String>>, HarnessError> {
        let state = self.state.lock().unwrap();
        Ok(Self::visible(&state, row)
            .into_iter()
            .map(|e| e.cells)
            .collect())
    }

    async fn close(&self) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        state.actions.push(Action::Close);
        state.closed = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// A small model of the EMI calculator site.

pub fn rupees(value: f64) -> String {
    let whole = value.round().max(0.0) as u64;
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₹ {}", grouped)
}

fn emi(principal: f64, annual_rate: f64, months: f64) -> f64 {
    if principal <= 0.0 || months <= 0.0 {
        return 0.0;
    }
    let i = annual_rate / 1200.0;
    if i == 0.0 {
        return principal / months;
    }
    let factor = (1.0 + i).powf(months);
    principal * i * factor / (factor - 1.0)
}

fn principal_for(emi: f64, annual_rate: f64, months: f64) -> f64 {
    let i = annual_rate / 1200.0;
    if i == 0.0 {
        return emi * months;
    }
    emi * (1.0 - (1.0 + i).powf(-months)) / i
}

fn first_month(principal: f64, annual_rate: f64, months: f64) -> (String, String) {
    let payment = emi(principal, annual_rate, months);
    let interest = principal * annual_rate / 1200.0;
    let principal_part = (payment - interest).max(0.0);
    if payment == 0.0 {
        return (rupees(0.0), rupees(0.0));
    }
    (rupees(principal_part), rupees(interest))
}

/// Principal and interest cells repeat across summary and schedule widgets;
/// the first-month figures sit at positions 2 and 3.
fn shared_breakdown(principal: String, interest: String) -> Vec<(Selector, Vec<FakeElement>)> {
    vec![
        (
            EmiSelectors::PRINCIPAL_AMOUNT,
            vec![
                FakeElement::text("Principal Amount"),
                FakeElement::text("₹ 0"),
                FakeElement::text(principal),
                FakeElement::text("₹ 1"),
            ],
        ),
        (
            EmiSelectors::INTEREST_AMOUNT,
            vec![
                FakeElement::text("Interest"),
                FakeElement::text("Total Interest"),
                FakeElement::text("₹ 2"),
                FakeElement::text(interest),
            ],
        ),
    ]
}

fn home_loan_outputs(view: &SiteView<'_>) -> Vec<(Selector, Vec<FakeElement>)> {
    let amount = view.number(EmiSelectors::HOME_PRICE);
    let rate = view.number(EmiSelectors::HOME_LOAN_INTEREST);
    let years = view.number(EmiSelectors::HOME_LOAN_TERM);
    let months = years * 12.0;
    let (principal, interest) = first_month(amount, rate, months);
    let payment = emi(amount, rate, months);

    let mut rows = Vec::new();
    let mut balance = amount;
    for year in 1..=(years as u32).min(3) {
        let mut year_principal = 0.0;
        let mut year_interest = 0.0;
        for _ in 0..12 {
            let interest = balance * rate / 1200.0;
            let principal = payment - interest;
            balance -= principal;
            year_principal += principal;
            year_interest += interest;
        }
        rows.push(FakeElement::row(vec![
            (2024 + year).to_string(),
            rupees(year_principal),
            rupees(year_interest),
            rupees(year_principal + year_interest),
            rupees(balance.max(0.0)),
        ]));
    }

    vec![
        (
            EmiSelectors::MONTHLY_PAYMENT,
            vec![
                FakeElement::text(principal),
                FakeElement::text(interest),
                FakeElement::text(rupees(payment)),
            ],
        ),
        (
            EmiSelectors::TABLE_HEADERS,
            vec![
                FakeElement::text("Year"),
                FakeElement::text("Principal\n(A)"),
                FakeElement::text("Interest\n(B)"),
                FakeElement::text("Total Payment\n(A + B)"),
                FakeElement::text("Balance"),
            ],
        ),
        (EmiSelectors::PAYMENT_ROWS, rows),
    ]
}

fn solve_rate(amount: f64, payment: f64, months: f64) -> f64 {
    let (mut low, mut high) = (0.0001, 100.0);
    for _ in 0..200 {
        let mid = (low + high) / 2.0;
        if emi(amount, mid, months) > payment {
            high = mid;
        } else {
            low = mid;
        }
    }
    (low + high) / 2.0
}

fn emi_model(view: &SiteView<'_>) -> Vec<(Selector, Vec<FakeElement>)> {
    if view.field(EmiSelectors::HOME_PRICE).is_some() {
        return home_loan_outputs(view);
    }

    let rate = view.number(EmiSelectors::LOAN_INTEREST);
    match view.active_tab {
        Some(tab) if tab == EmiSelectors::LOAN_AMOUNT_CALC_TAB => {
            let term = view.number(EmiSelectors::LOAN_TERM);
            let months = if view.monthly_tenure { term } else { term * 12.0 };
            let amount = principal_for(view.number(EmiSelectors::LOAN_EMI), rate, months);
            let (principal, interest) = first_month(amount, rate, months);
            shared_breakdown(principal, interest)
        }
        Some(tab) if tab == EmiSelectors::LOAN_TENURE_CALC_TAB => {
            let months = match view.field(EmiSelectors::LOAN_EMI) {
                None => 36.0,
                Some(_) => {
                    let amount = view.number(EmiSelectors::LOAN_AMOUNT);
                    let payment = view.number(EmiSelectors::LOAN_EMI);
                    let i = rate / 1200.0;
                    (-(1.0 - amount * i / payment).ln() / (1.0 + i).ln()).ceil()
                }
            };
            vec![(
                EmiSelectors::LOAN_SUMMARY_TENURE,
                vec![FakeElement::text(format!("Loan Tenure{}months", months))],
            )]
        }
        Some(tab) if tab == EmiSelectors::INTEREST_RATE_CALC_TAB => {
            let amount = view.number(EmiSelectors::LOAN_AMOUNT);
            let payment = view.number(EmiSelectors::LOAN_EMI);
            let months = view.number(EmiSelectors::LOAN_TERM) * 12.0;
            let rate = solve_rate(amount, payment, months);
            vec![(
                EmiSelectors::LOAN_SUMMARY_INTEREST_RATE,
                vec![FakeElement::text(format!("Interest Rate{:.2}%", rate))],
            )]
        }
        _ => {
            let amount = view.number(EmiSelectors::LOAN_AMOUNT);
            let months = view.number(EmiSelectors::LOAN_TERM) * 12.0;
            let (principal, interest) = first_month(amount, rate, months);
            shared_breakdown(principal, interest)
        }
    }
}

/// The landing page plus the two menu-reachable calculator pages.
pub fn emi_site() -> FakeSite {
    FakeSite::blank()
        .present(EmiSelectors::CAR_LOAN_TAB)
        .present(EmiSelectors::LOAN_AMOUNT)
        .present(EmiSelectors::LOAN_INTEREST)
        .present(EmiSelectors::LOAN_TERM)
        .present(MenuItem::LoanCalculatorsAndWidgets.selector())
        .reveals(
            MenuItem::LoanCalculatorsAndWidgets.selector(),
            &[
                MenuItem::HomeLoanEmiCalculator.selector(),
                MenuItem::LoanCalculator.selector(),
            ],
        )
        .reveals(
            MenuItem::HomeLoanEmiCalculator.selector(),
            &[
                EmiSelectors::HOME_PRICE,
                EmiSelectors::HOME_LOAN_INTEREST,
                EmiSelectors::HOME_LOAN_TERM,
            ],
        )
        .reveals(
            MenuItem::LoanCalculator.selector(),
            &[
                EmiSelectors::LOAN_AMOUNT_CALC_TAB,
                EmiSelectors::LOAN_TENURE_CALC_TAB,
                EmiSelectors::INTEREST_RATE_CALC_TAB,
                EmiSelectors::LOAN_EMI,
                EmiSelectors::MONTH_TOGGLE,
            ],
        )
        .with_model(emi_model)
}

pub fn test_config(artifact: &Path) -> Config {
    Config {
        element_timeout_ms: 500,
        poll_interval_ms: 5,
        navigation_timeout_ms: 200,
        scenario_timeout_ms: 1_000,
        table_artifact_path: artifact.to_path_buf(),
        ..Config::default()
    }
}
