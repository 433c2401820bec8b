use crate::browser::{KeyTarget, Page, SessionController, Settle, WebDriverPage};
use crate::calculators::selectors::{
    fill_plan, result_shape, EmiSelectors, FillStep, ResultShape, ResultSlot,
};
use crate::calculators::table::{extract_amortization_table, write_table_artifact};
use crate::calculators::{
    AmortizationTable, Breakdown, CalculatorResult, CalculatorVariant, LoanInput, ScalarResult,
    ScenarioState,
};
use crate::config::Config;
use crate::error::{HarnessError, Result};
use std::path::{Path, PathBuf};

/// Per-scenario façade over the EMI calculator site.
///
/// Owns its [`SessionController`] so no page handle is ever shared between
/// scenarios. Operations move the scenario strictly forward through
/// `Idle → Navigated → Filled → Read → Done`; reading again stays in `Read`.
pub struct EmiCalculatorPage<P: Page> {
    session: SessionController<P>,
    settle: Settle,
    artifact_path: PathBuf,
    state: ScenarioState,
    filled: Option<CalculatorVariant>,
}

impl EmiCalculatorPage<WebDriverPage> {
    /// Starts a dedicated WebDriver session for one scenario.
    pub async fn connect(config: &Config) -> Result<Self> {
        let session = SessionController::connect(config).await?;
        Ok(Self::new(session, config))
    }
}

impl<P: Page> EmiCalculatorPage<P> {
    pub fn new(session: SessionController<P>, config: &Config) -> Self {
        Self {
            settle: session.settle(),
            session,
            artifact_path: config.table_artifact_path.clone(),
            state: ScenarioState::Idle,
            filled: None,
        }
    }

    pub fn state(&self) -> ScenarioState {
        self.state
    }

    pub fn filled_variant(&self) -> Option<CalculatorVariant> {
        self.filled
    }

    pub fn session(&self) -> &SessionController<P> {
        &self.session
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Loads the landing page. Only valid before anything has been navigated or filled.
    pub async fn open(&mut self) -> Result<()> {
        if self.state != ScenarioState::Idle {
            return Err(HarnessError::OutOfOrder {
                operation: "open the site",
                state: self.state,
            });
        }
        self.session.open().await
    }

    /// Walks the menu to the section hosting `variant`. A no-op for landing-page calculators.
    pub async fn navigate_to(&mut self, variant: CalculatorVariant) -> Result<()> {
        if self.state != ScenarioState::Idle {
            return Err(HarnessError::OutOfOrder {
                operation: "navigate",
                state: self.state,
            });
        }
        if !variant.requires_navigation() {
            return Ok(());
        }

        self.session.goto_section(variant.section()).await?;
        self.state = ScenarioState::Navigated;
        Ok(())
    }

    /// Writes the variant's fields and issues its commit.
    ///
    /// Returns as soon as the commit has been sent; the page may still be
    /// recomputing. Fields absent from `input` keep whatever the page shows.
    pub async fn fill(&mut self, variant: CalculatorVariant, input: &LoanInput) -> Result<()> {
        let ready = match self.state {
            ScenarioState::Idle => !variant.requires_navigation(),
            ScenarioState::Navigated => true,
            _ => false,
        };
        if !ready {
            return Err(HarnessError::OutOfOrder {
                operation: "fill",
                state: self.state,
            });
        }
        if !self.session.is_open() {
            return Err(HarnessError::Navigation("session is not open".to_string()));
        }

        tracing::info!("📝 Filling {} calculator", variant);
        let page = self.session.page();

        for step in fill_plan(variant) {
            match *step {
                FillStep::Click(selector) => {
                    self.settle.until_present(page, selector, 0).await?;
                    page.click(selector, 0).await?;
                }
                FillStep::Field(selector, field) => {
                    let Some(value) = input.value(field) else {
                        tracing::debug!("{} not supplied, keeping page value", field.label());
                        continue;
                    };
                    self.settle.until_present(page, selector, 0).await?;
                    page.fill(selector, value).await?;
                    tracing::debug!("{} = {:?}", field.label(), value);
                }
                FillStep::Commit(target) => {
                    if let KeyTarget::Element(selector) = target {
                        self.settle.until_present(page, selector, 0).await?;
                    }
                    page.press_enter(target).await?;
                }
            }
        }

        self.filled = Some(variant);
        self.state = ScenarioState::Filled;
        Ok(())
    }

    /// Reads the variant's result once the page has rendered it.
    pub async fn read_result(&mut self, variant: CalculatorVariant) -> Result<CalculatorResult> {
        self.ensure_readable(variant)?;

        let result = match result_shape(variant) {
            ResultShape::Breakdown(slots) => CalculatorResult::Breakdown(Breakdown {
                principal: self.read_slot(slots.first_month_principal).await?,
                interest: self.read_slot(slots.first_month_interest).await?,
            }),
            ResultShape::Scalar(slot) => CalculatorResult::Scalar(ScalarResult {
                text: self.read_slot(slot).await?,
            }),
        };

        tracing::info!("✅ {} result: {:?}", variant, result.texts());
        self.state = ScenarioState::Read;
        Ok(result)
    }

    pub async fn read_breakdown(&mut self, variant: CalculatorVariant) -> Result<Breakdown> {
        match self.read_result(variant).await? {
            CalculatorResult::Breakdown(b) => Ok(b),
            CalculatorResult::Scalar(_) => Err(HarnessError::VariantMismatch {
                expected: "a breakdown calculator".to_string(),
                actual: Some(variant),
            }),
        }
    }

    pub async fn get_loan_tenure(&mut self) -> Result<ScalarResult> {
        self.read_scalar(CalculatorVariant::LoanTenure).await
    }

    pub async fn get_interest_rate(&mut self) -> Result<ScalarResult> {
        self.read_scalar(CalculatorVariant::InterestRate).await
    }

    /// Extracts the home-loan amortization table and overwrites the JSON artifact.
    pub async fn extract_amortization_table(&mut self) -> Result<AmortizationTable> {
        self.ensure_readable(CalculatorVariant::HomeLoan)?;

        let page = self.session.page();
        self.settle
            .until_present(page, EmiSelectors::TABLE_HEADERS, 0)
            .await?;
        let table = extract_amortization_table(page).await?;
        write_table_artifact(&table, &self.artifact_path)?;
        Ok(table)
    }

    /// Tears down the session. The façade cannot be used afterwards.
    pub async fn close(&mut self) -> Result<()> {
        self.state = ScenarioState::Done;
        self.session.close().await
    }

    async fn read_scalar(&mut self, variant: CalculatorVariant) -> Result<ScalarResult> {
        match self.read_result(variant).await? {
            CalculatorResult::Scalar(s) => Ok(s),
            CalculatorResult::Breakdown(_) => Err(HarnessError::VariantMismatch {
                expected: "a single-figure calculator".to_string(),
                actual: Some(variant),
            }),
        }
    }

    async fn read_slot(&self, slot: ResultSlot) -> Result<String> {
        self.settle
            .text_at(self.session.page(), slot.selector, slot.index)
            .await
    }

    fn ensure_readable(&self, variant: CalculatorVariant) -> Result<()> {
        if !matches!(self.state, ScenarioState::Filled | ScenarioState::Read) {
            return Err(HarnessError::OutOfOrder {
                operation: "read results",
                state: self.state,
            });
        }
        if self.filled != Some(variant) {
            return Err(HarnessError::VariantMismatch {
                expected: variant.name().to_string(),
                actual: self.filled,
            });
        }
        Ok(())
    }
}
