use crate::browser::Page;
use crate::calculators::EmiCalculatorPage;
use crate::error::{HarnessError, Result};
use futures::future::BoxFuture;
use std::time::Duration;

/// Opens the site, runs `body` against the scenario's own façade, and always
/// closes the session afterwards.
///
/// If `limit` elapses first the body is dropped mid-flight and the scenario
/// fails with [`HarnessError::ScenarioTimeout`]; nothing it read is returned.
pub async fn run_scenario<P, T, F>(
    mut page: EmiCalculatorPage<P>,
    limit: Duration,
    body: F,
) -> Result<T>
where
    P: Page,
    F: for<'a> FnOnce(&'a mut EmiCalculatorPage<P>) -> BoxFuture<'a, Result<T>>,
{
    let session_id = page.session().session_id();

    let outcome = tokio::time::timeout(limit, async {
        page.open().await?;
        body(&mut page).await
    })
    .await;

    // Close failures are logged by the controller; they never mask the scenario outcome.
    let _ = page.close().await;

    match outcome {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(
                "❌ [{}] Scenario exceeded {} ms, session torn down",
                session_id,
                limit.as_millis()
            );
            Err(HarnessError::ScenarioTimeout(limit.as_millis() as u64))
        }
    }
}
