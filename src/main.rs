use emi_harness::calculators::{CalculatorResult, CalculatorVariant, EmiCalculatorPage};
use emi_harness::config::Config;
use emi_harness::fixtures::LoanData;
use emi_harness::scenario::run_scenario;
use emi_harness::utils::{parse_percentage, parse_rupee_amount, parse_tenure_months};
use emi_harness::HarnessError;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},emi_harness=debug", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 EMI calculator probe");
    tracing::info!("   Site: {}", config.base_url);
    tracing::info!("   WebDriver: {} ({:?})", config.webdriver_url, config.browser);
    tracing::info!("   Fixtures: {}", config.fixtures_path.display());

    let data = Arc::new(LoanData::load(&config.fixtures_path)?);

    // One isolated session per calculator.
    let mut join_set = JoinSet::new();
    for variant in CalculatorVariant::ALL {
        let config = config.clone();
        let data = data.clone();
        join_set.spawn(async move {
            let result = probe(variant, &config, &data).await;
            (variant, result)
        });
    }

    let mut failures = 0;
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((variant, Ok(result))) => report(variant, &result),
            Ok((variant, Err(e))) => {
                failures += 1;
                tracing::error!("❌ {} [{:?}]: {}", variant, e.code(), e);
            }
            Err(e) => {
                failures += 1;
                tracing::error!("❌ Task join error: {}", e);
            }
        }
    }

    tracing::info!(
        "📊 {} calculators probed, {} failed",
        CalculatorVariant::ALL.len(),
        failures
    );
    Ok(())
}

async fn probe(
    variant: CalculatorVariant,
    config: &Config,
    data: &LoanData,
) -> Result<CalculatorResult, HarnessError> {
    let page = EmiCalculatorPage::connect(config).await?;
    let input = data.for_variant(variant).clone();

    run_scenario(page, config.scenario_timeout(), move |page| {
        Box::pin(async move {
            page.navigate_to(variant).await?;
            page.fill(variant, &input).await?;
            if variant.has_amortization_table() {
                let table = page.extract_amortization_table().await?;
                tracing::info!("{} amortization rows captured", table.len());
            }
            page.read_result(variant).await
        })
    })
    .await
}

fn report(variant: CalculatorVariant, result: &CalculatorResult) {
    match result {
        CalculatorResult::Breakdown(b) => {
            let principal = parse_rupee_amount(&b.principal)
                .map(|d| d.to_string())
                .unwrap_or_else(|_| "?".to_string());
            let interest = parse_rupee_amount(&b.interest)
                .map(|d| d.to_string())
                .unwrap_or_else(|_| "?".to_string());
            tracing::info!(
                "✅ {}: principal {:?} ({}), interest {:?} ({})",
                variant,
                b.principal,
                principal,
                b.interest,
                interest
            );
        }
        CalculatorResult::Scalar(s) => {
            let parsed = match variant {
                CalculatorVariant::LoanTenure => parse_tenure_months(&s.text)
                    .map(|m| format!("{} months", m))
                    .unwrap_or_else(|_| "?".to_string()),
                _ => parse_percentage(&s.text)
                    .map(|p| format!("{}%", p))
                    .unwrap_or_else(|_| "?".to_string()),
            };
            tracing::info!("✅ {}: {:?} ({})", variant, s.text, parsed);
        }
    }
}
