use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;

use crate::logging;

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

/// Query parameters whose values must never reach the log files.
const SECRET_PARAMS: &[&str] = &["apikey", "apiKey"];

/// Returns the reqwest client singleton instance or creates one if it doesn't exist.
///
/// The client carries a connect timeout and a total request timeout so a slow
/// upstream cannot hold a form submission open indefinitely.
fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        // reqwest 只帶 rustls-no-provider，已安裝過會回傳 Err，忽略即可
        let _ = rustls::crypto::ring::default_provider().install_default();

        Client::builder()
            // ===== 壓縮 =====
            .brotli(true)
            .gzip(true)
            // ===== 超時設置 =====
            .connect_timeout(Duration::from_secs(8))
            .timeout(Duration::from_secs(15))
            // ===== TCP 優化 =====
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            // ===== 連接池 =====
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            // ===== Headers =====
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
    })
}

/// Performs an HTTP GET request and returns the raw response, whatever its status.
///
/// # Arguments
///
/// * `url`: The URL to send the GET request to.
///
/// # Returns
///
/// * `Result<Response>`: The HTTP response, or an error if the request could not be sent.
pub async fn get_response(url: &str) -> Result<Response> {
    send(Method::GET, url).await
}

/// Performs an HTTP GET request and deserializes the JSON response into the specified type.
///
/// Non-2xx statuses are turned into errors before the body is read.
pub async fn get_json<RES: DeserializeOwned>(url: &str) -> Result<RES> {
    get_response(url)
        .await?
        .error_for_status()
        .map_err(|e| anyhow!("Unexpected status from {}: {:?}", redact_url(url), e.status()))?
        .json::<RES>()
        .await
        .map_err(|e| anyhow!("Error parsing response JSON: {:?}", e.without_url()))
}

/// Sends a single HTTP request. Failures are logged and returned, never retried.
async fn send(method: Method, url: &str) -> Result<Response> {
    let visit_log = format!("{method}:{}", redact_url(url));
    let client = get_client()?;
    let rb = client.request(method, url);

    let start = Instant::now();
    let res = rb.send().await;
    let elapsed = start.elapsed().as_millis();

    match res {
        Ok(response) => {
            logging::info_file_async(format!(
                "{} {} {} ms",
                visit_log,
                response.status(),
                elapsed
            ));
            Ok(response)
        }
        Err(why) => {
            let why = why.without_url();
            logging::error_file_async(format!(
                "{} failed because {:?}. {} ms",
                visit_log, why, elapsed
            ));
            Err(anyhow!("Failed to send request to {}: {}", visit_log, why))
        }
    }
}

/// Masks the values of API-key query parameters so URLs can be logged.
pub fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SECRET_PARAMS.contains(&key) => format!("{}=***", key),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", base, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("https://www.alphavantage.co/query?function=TIME_SERIES_DAILY&symbol=IBM&apikey=secret"),
            "https://www.alphavantage.co/query?function=TIME_SERIES_DAILY&symbol=IBM&apikey=***"
        );
        assert_eq!(
            redact_url("https://newsapi.org/v2/everything?q=Apple&apiKey=secret&sortBy=publishedAt"),
            "https://newsapi.org/v2/everything?q=Apple&apiKey=***&sortBy=publishedAt"
        );
        assert_eq!(redact_url("https://newsapi.org"), "https://newsapi.org");
    }

    #[tokio::test]
    async fn test_get_response_connection_refused() {
        // 綁定後立刻釋放，確保沒有人在聽這個埠
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/query?apikey=secret", addr);
        let err = get_response(&url).await.unwrap_err();

        assert!(!err.to_string().contains("secret"));
    }
}
