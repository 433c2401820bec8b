use crate::error::{HarnessError, Result};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, Locator};
use std::fmt;

/// WebDriver key code for Enter.
const ENTER_KEY: &str = "\u{E007}";

/// A static element query against the target page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    Css(&'static str),
    XPath(&'static str),
}

impl Selector {
    pub fn locator(&self) -> Locator<'static> {
        match *self {
            Selector::Css(css) => Locator::Css(css),
            Selector::XPath(xpath) => Locator::XPath(xpath),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(css) => write!(f, "css={}", css),
            Selector::XPath(xpath) => write!(f, "xpath={}", xpath),
        }
    }
}

/// Where a key press lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    Element(Selector),
    Focused,
}

/// The browser operations the harness needs.
///
/// Every method is a single snapshot against the live page: nothing here waits
/// for content to appear. Waiting is layered on top by [`crate::browser::Settle`].
#[async_trait]
pub trait Page: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    /// `document.readyState` of the current document.
    async fn ready_state(&self) -> Result<String>;

    /// Number of attached elements matching `selector`.
    async fn count(&self, selector: Selector) -> Result<usize>;

    async fn click(&self, selector: Selector, index: usize) -> Result<()>;

    /// Clears the field and types `value` into it. An empty value leaves the field empty.
    async fn fill(&self, selector: Selector, value: &str) -> Result<()>;

    async fn press_enter(&self, target: KeyTarget) -> Result<()>;

    /// `textContent` of the `index`-th match, `None` when there is no such match.
    async fn text_content(&self, selector: Selector, index: usize) -> Result<Option<String>>;

    /// Rendered text of every match, in document order.
    async fn inner_texts(&self, selector: Selector) -> Result<Vec<String>>;

    /// Rendered text of each `cell` inside each `row`, in document order.
    async fn row_cells(&self, row: Selector, cell: Selector) -> Result<Vec<Vec<String>>>;

    async fn close(&self) -> Result<()>;
}

/// [`Page`] over a live fantoccini WebDriver session.
#[derive(Clone)]
pub struct WebDriverPage {
    client: Client,
}

impl WebDriverPage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn nth(&self, selector: Selector, index: usize) -> Result<Element> {
        let mut elements = self.client.find_all(selector.locator()).await?;
        if index >= elements.len() {
            return Err(HarnessError::ElementNotFound {
                what: format!("{} [{}] ({} matches)", selector, index, elements.len()),
                waited_ms: 0,
            });
        }
        Ok(elements.swap_remove(index))
    }
}

#[async_trait]
impl Page for WebDriverPage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| HarnessError::Navigation(format!("{}: {}", url, e)))
    }

    async fn ready_state(&self) -> Result<String> {
        let value = self
            .client
            .execute("return document.readyState;", vec![])
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn count(&self, selector: Selector) -> Result<usize> {
        Ok(self.client.find_all(selector.locator()).await?.len())
    }

    async fn click(&self, selector: Selector, index: usize) -> Result<()> {
        self.nth(selector, index).await?.click().await?;
        Ok(())
    }

    async fn fill(&self, selector: Selector, value: &str) -> Result<()> {
        let element = self.nth(selector, 0).await?;
        element.clear().await?;
        if !value.is_empty() {
            element.send_keys(value).await?;
        }
        Ok(())
    }

    async fn press_enter(&self, target: KeyTarget) -> Result<()> {
        let element = match target {
            KeyTarget::Element(selector) => self.nth(selector, 0).await?,
            KeyTarget::Focused => self.client.active_element().await?,
        };
        element.send_keys(ENTER_KEY).await?;
        Ok(())
    }

    async fn text_content(&self, selector: Selector, index: usize) -> Result<Option<String>> {
        let elements = self.client.find_all(selector.locator()).await?;
        match elements.get(index) {
            Some(element) => Ok(Some(
                element.prop("textContent").await?.unwrap_or_default(),
            )),
            None => Ok(None),
        }
    }

    async fn inner_texts(&self, selector: Selector) -> Result<Vec<String>> {
        let mut texts = Vec::new();
        for element in self.client.find_all(selector.locator()).await? {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    async fn row_cells(&self, row: Selector, cell: Selector) -> Result<Vec<Vec<String>>> {
        let mut rows = Vec::new();
        for row_element in self.client.find_all(row.locator()).await? {
            let mut cells = Vec::new();
            for cell_element in row_element.find_all(cell.locator()).await? {
                cells.push(cell_element.text().await?.trim().to_string());
            }
            rows.push(cells);
        }
        Ok(rows)
    }

    async fn close(&self) -> Result<()> {
        self.client.clone().close().await?;
        Ok(())
    }
}
