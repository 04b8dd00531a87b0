use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;

use crate::{
    config::AlphaVantage,
    declare::{DailyPriceRecord, Outcome, PriceSeries},
    logging,
    util::{datetime, http, text},
};

/// `TIME_SERIES_DAILY` 的回應
///
/// 查無代號或超過免費額度時沒有 `Time Series (Daily)`，改帶一段說明文字。
#[derive(Deserialize, Debug)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)", default)]
    time_series: BTreeMap<String, DailyBar>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

/// 數值全部以字串表示
#[derive(Deserialize, Debug)]
struct DailyBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

impl DailyBar {
    fn to_record(&self, date: &str) -> Result<DailyPriceRecord> {
        Ok(DailyPriceRecord {
            date: datetime::parse_iso_date(date)?,
            open: text::parse_decimal(&self.open, None)?,
            high: text::parse_decimal(&self.high, None)?,
            low: text::parse_decimal(&self.low, None)?,
            close: text::parse_decimal(&self.close, None)?,
            volume: text::parse_i64(&self.volume, None)?,
        })
    }
}

/// 取得 `symbol` 最近 `days` 天的每日行情
pub async fn fetch_daily_series(cfg: &AlphaVantage, symbol: &str, days: i64) -> Outcome<PriceSeries> {
    let cutoff = Local::now().date_naive() - Duration::days(days);
    fetch_daily_series_since(cfg, symbol, cutoff).await
}

/// 取得 `symbol` 在 `cutoff`（不含）之後的每日行情
///
/// 連線失敗、HTTP 錯誤、回應沒有時間序列或數值無法解析，都會記錄後回傳 `Unavailable`。
/// 期間內沒有任何交易日則回傳 `Empty`。
pub async fn fetch_daily_series_since(
    cfg: &AlphaVantage,
    symbol: &str,
    cutoff: NaiveDate,
) -> Outcome<PriceSeries> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        logging::warn_file_async("Skip daily series because the symbol is empty".to_string());
        return Outcome::Unavailable;
    }

    match visit(cfg, symbol, cutoff).await {
        Ok(outcome) => outcome,
        Err(why) => {
            logging::error_file_async(format!(
                "Failed to fetch daily series({}) because {:?}",
                symbol, why
            ));
            Outcome::Unavailable
        }
    }
}

async fn visit(cfg: &AlphaVantage, symbol: &str, cutoff: NaiveDate) -> Result<Outcome<PriceSeries>> {
    let url = build_url(cfg, symbol);
    let body = http::get_json::<DailyResponse>(&url).await?;

    to_series(symbol, body, cutoff)
}

fn build_url(cfg: &AlphaVantage, symbol: &str) -> String {
    format!(
        "{base}/query?function=TIME_SERIES_DAILY&symbol={symbol}&apikey={key}",
        base = cfg.base_url.trim_end_matches('/'),
        symbol = urlencoding::encode(symbol),
        key = urlencoding::encode(&cfg.api_key),
    )
}

fn to_series(symbol: &str, body: DailyResponse, cutoff: NaiveDate) -> Result<Outcome<PriceSeries>> {
    if body.time_series.is_empty() {
        let reason = body
            .error_message
            .or(body.note)
            .or(body.information)
            .unwrap_or_else(|| "no time series in response".to_string());
        logging::warn_file_async(format!(
            "Alpha Vantage has no daily series for {}: {}",
            symbol, reason
        ));
        return Ok(Outcome::Unavailable);
    }

    let records = body
        .time_series
        .iter()
        .map(|(date, bar)| {
            bar.to_record(date)
                .map_err(|why| anyhow!("Malformed bar {} of {}: {:?}", date, symbol, why))
        })
        .collect::<Result<Vec<_>>>()?;

    let series = PriceSeries::since(records, cutoff);
    if series.is_empty() {
        return Ok(Outcome::Empty);
    }

    logging::debug_file_async(format!(
        "{} daily records of {} since {}",
        series.len(),
        symbol,
        cutoff
    ));

    Ok(Outcome::Ready(series))
}
