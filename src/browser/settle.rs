use crate::browser::page::{Page, Selector};
use crate::config::Config;
use crate::error::{HarnessError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Bounded wait for the page to catch up after an interaction.
///
/// Polls a probe until it yields a value or `timeout` elapses; expiry becomes a
/// single [`HarnessError::ElementNotFound`]. Probe errors end the wait immediately.
#[derive(Debug, Clone, Copy)]
pub struct Settle {
    pub timeout: Duration,
    pub poll: Duration,
}

impl Settle {
    pub fn new(timeout: Duration, poll: Duration) -> Self {
        Self {
            timeout,
            poll: poll.max(Duration::from_millis(1)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.element_timeout(), config.poll_interval())
    }

    pub async fn until<T, F, Fut>(&self, what: impl Into<String>, mut probe: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let started = Instant::now();
        let deadline = started + self.timeout;

        loop {
            if let Some(value) = probe().await? {
                return Ok(value);
            }

            let now = Instant::now();
            if now >= deadline {
                let what = what.into();
                tracing::debug!("⏱️ Gave up waiting for {}", what);
                return Err(HarnessError::ElementNotFound {
                    what,
                    waited_ms: started.elapsed().as_millis() as u64,
                });
            }
            tokio::time::sleep(self.poll.min(deadline - now)).await;
        }
    }

    /// Waits until at least `index + 1` elements match, i.e. the `index`-th exists.
    pub async fn until_present<P>(&self, page: &P, selector: Selector, index: usize) -> Result<usize>
    where
        P: Page + ?Sized,
    {
        self.until(format!("{} [{}]", selector, index), move || async move {
            let count = page.count(selector).await?;
            Ok((count > index).then_some(count))
        })
        .await
    }

    /// Waits for the `index`-th match and returns its trimmed text.
    pub async fn text_at<P>(&self, page: &P, selector: Selector, index: usize) -> Result<String>
    where
        P: Page + ?Sized,
    {
        self.until(format!("{} [{}]", selector, index), move || async move {
            Ok(page
                .text_content(selector, index)
                .await?
                .map(|text| text.trim().to_string()))
        })
        .await
    }
}
