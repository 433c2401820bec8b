use crate::browser::driver::create_webdriver_client;
use crate::browser::page::{Page, Selector, WebDriverPage};
use crate::browser::settle::Settle;
use crate::config::Config;
use crate::error::{HarnessError, Result};
use std::time::Duration;
use uuid::Uuid;

/// One entry of the site's nested "Loan Calculators & Widgets" menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    LoanCalculatorsAndWidgets,
    HomeLoanEmiCalculator,
    LoanCalculator,
}

impl MenuItem {
    pub fn title(&self) -> &'static str {
        match self {
            MenuItem::LoanCalculatorsAndWidgets => "Loan Calculators & Widgets",
            MenuItem::HomeLoanEmiCalculator => "Home Loan EMI Calculator",
            MenuItem::LoanCalculator => "Loan Calculator",
        }
    }

    pub fn selector(&self) -> Selector {
        match self {
            MenuItem::LoanCalculatorsAndWidgets => {
                Selector::XPath("//a[@title='Loan Calculators & Widgets']")
            }
            MenuItem::HomeLoanEmiCalculator => Selector::XPath("//a[@title='Home Loan EMI Calculator']"),
            MenuItem::LoanCalculator => Selector::XPath("//a[@title='Loan Calculator']"),
        }
    }
}

/// Owns the browsing context of a single scenario.
pub struct SessionController<P: Page> {
    page: P,
    base_url: String,
    navigation_timeout: Duration,
    settle: Settle,
    session_id: Uuid,
    opened: bool,
    closed: bool,
}

impl SessionController<WebDriverPage> {
    /// Starts a fresh WebDriver session. The landing page is not loaded until [`open`](Self::open).
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = create_webdriver_client(config).await?;
        Ok(Self::new(WebDriverPage::new(client), config))
    }
}

impl<P: Page> SessionController<P> {
    pub fn new(page: P, config: &Config) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
            navigation_timeout: config.navigation_timeout(),
            settle: Settle::from_config(config),
            session_id: Uuid::new_v4(),
            opened: false,
            closed: false,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn settle(&self) -> Settle {
        self.settle
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn is_open(&self) -> bool {
        self.opened && !self.closed
    }

    /// Navigates to the landing page and waits for the load lifecycle to finish.
    pub async fn open(&mut self) -> Result<()> {
        if self.closed {
            return Err(HarnessError::Navigation(
                "session already closed".to_string(),
            ));
        }

        tracing::info!("🔍 [{}] Opening {}", self.session_id, self.base_url);

        let page = &self.page;
        let url = self.base_url.as_str();
        let poll = self.settle.poll;
        let loaded = tokio::time::timeout(self.navigation_timeout, async move {
            page.goto(url).await?;
            loop {
                if page.ready_state().await? == "complete" {
                    return Ok::<(), HarnessError>(());
                }
                tokio::time::sleep(poll).await;
            }
        })
        .await;

        match loaded {
            Ok(Ok(())) => {
                self.opened = true;
                tracing::info!("✅ [{}] Landing page loaded", self.session_id);
                Ok(())
            }
            Ok(Err(HarnessError::Navigation(msg))) => Err(HarnessError::Navigation(msg)),
            Ok(Err(e)) => Err(HarnessError::Navigation(format!(
                "{} did not load: {}",
                self.base_url, e
            ))),
            Err(_) => Err(HarnessError::Navigation(format!(
                "{} did not reach the load state within {} ms",
                self.base_url,
                self.navigation_timeout.as_millis()
            ))),
        }
    }

    /// Clicks through `path` in order. Stops at the first missing item.
    pub async fn goto_section(&mut self, path: &[MenuItem]) -> Result<()> {
        if !self.is_open() {
            return Err(HarnessError::Navigation(
                "session is not open".to_string(),
            ));
        }

        for item in path {
            tracing::debug!("[{}] Menu → {}", self.session_id, item.title());
            self.settle
                .until_present(&self.page, item.selector(), 0)
                .await?;
            self.page.click(item.selector(), 0).await?;
        }

        if let Some(last) = path.last() {
            tracing::info!("✅ [{}] Reached section '{}'", self.session_id, last.title());
        }
        Ok(())
    }

    /// Ends the session. Closing twice is a no-op.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.page.close().await;
        match &result {
            Ok(()) => tracing::info!("[{}] Session closed", self.session_id),
            Err(e) => tracing::warn!("⚠️ [{}] Session close failed: {}", self.session_id, e),
        }
        result
    }
}
