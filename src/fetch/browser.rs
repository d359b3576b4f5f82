use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::error::SiftError;

/// Fetch a page through headless Chromium so script-generated content is
/// present in the captured HTML.
///
/// One isolated browser process per call. The navigate/wait/capture sequence
/// runs in an inner future whose result is only returned after the browser
/// has been torn down, so a failure mid-render cannot leak the process.
///
/// The post-navigation wait is a blind settle delay, not a readiness signal;
/// pages that render slower than the wait come back incomplete.
pub async fn fetch_rendered(url: &str, config: &FetchConfig) -> Result<String, SiftError> {
    let browser_config = build_browser_config()?;

    let (mut browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        SiftError::browser(format!(
            "failed to launch headless Chrome: {e}. Dynamic rendering needs a \
             Chrome or Chromium binary; install one or point CHROME_BIN at it"
        ))
    })?;

    // The CDP connection goes dead unless the handler stream is polled.
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                warn!("browser CDP handler error: {event:?}");
                break;
            }
        }
    });

    let wait = Duration::from_secs(config.render_wait_secs);
    let rendered = async {
        debug!("navigating to {url}");
        let page = browser
            .new_page(url)
            .await
            .map_err(|e| SiftError::browser(format!("failed to navigate to {url}: {e}")))?;

        debug!("waiting {}s for client-side rendering to settle", wait.as_secs());
        tokio::time::sleep(wait).await;

        page.content()
            .await
            .map_err(|e| SiftError::browser(format!("failed to capture rendered page: {e}")))
    }
    .await;

    if let Err(e) = browser.close().await {
        warn!("failed to close browser session: {e}");
    }
    handler_task.abort();

    if let Ok(html) = &rendered {
        info!("captured {} bytes of rendered HTML from {url}", html.len());
    }
    rendered
}

fn build_browser_config() -> Result<BrowserConfig, SiftError> {
    let mut builder = BrowserConfig::builder()
        .no_sandbox()
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage");

    if let Some(bin) = find_chrome_binary() {
        debug!("using Chrome binary: {}", bin.display());
        builder = builder.chrome_executable(bin);
    }

    builder
        .build()
        .map_err(|e| SiftError::browser(format!("browser configuration error: {e}")))
}

/// Locate a usable Chrome/Chromium binary.
///
/// `CHROME_BIN` wins; otherwise probe well-known install paths. Snap's
/// `/snap/bin/chromium` wrapper strips standard Chrome flags, so the real
/// binary inside the snap is preferred. `None` leaves chromiumoxide to do its
/// own lookup.
fn find_chrome_binary() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("CHROME_BIN") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    let candidates: &[&str] = &[
        "/snap/chromium/current/usr/lib/chromium-browser/chrome",
        "/var/lib/flatpak/exports/bin/org.chromium.Chromium",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/google-chrome",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
    ];

    candidates.iter().map(PathBuf::from).find(|p| p.exists())
}
