use crate::config::{BrowserKind, Config};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;

pub async fn create_webdriver_client(
    config: &Config,
) -> Result<Client, fantoccini::error::NewSessionError> {
    let mut caps = serde_json::Map::new();

    match config.browser {
        BrowserKind::Chrome => {
            let mut args = vec![
                "--no-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
                "--disable-gpu".to_string(),
                "--window-size=1920,1080".to_string(),
                "--disable-infobars".to_string(),
            ];
            if config.headless {
                args.push("--headless=new".to_string());
            }

            let mut chrome_opts = serde_json::Map::new();
            chrome_opts.insert("args".to_string(), json!(args));
            chrome_opts.insert("excludeSwitches".to_string(), json!(["enable-automation"]));
            caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
            caps.insert("browserName".to_string(), json!("chrome"));
        }
        BrowserKind::Firefox => {
            let mut args = vec!["--width=1920".to_string(), "--height=1080".to_string()];
            if config.headless {
                args.push("-headless".to_string());
            }
            caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            caps.insert("browserName".to_string(), json!("firefox"));
        }
    }

    caps.insert("acceptInsecureCerts".to_string(), json!(true));
    caps.insert("pageLoadStrategy".to_string(), json!("normal"));
    caps.insert(
        "timeouts".to_string(),
        json!({ "pageLoad": config.navigation_timeout_ms }),
    );

    tracing::info!(
        "Connecting to {:?} WebDriver at {} (headless: {})",
        config.browser,
        config.webdriver_url,
        config.headless
    );

    let client = ClientBuilder::native()
        .capabilities(caps)
        .connect(&config.webdriver_url)
        .await?;

    tracing::info!("✅ WebDriver session established");

    Ok(client)
}
