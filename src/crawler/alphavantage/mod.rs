//! # Alpha Vantage 行情採集模組
//!
//! 透過 Alpha Vantage 的 `TIME_SERIES_DAILY` 取得美股每日 OHLCV。
//!
//! ## 站點資訊
//!
//! - 來源域名：`www.alphavantage.co`（可由設定檔覆寫）
//! - 存取方式：HTTP GET 搭配 `apikey` 查詢參數
//! - 主要端點：`/query`

/// 每日行情子模組
pub mod daily;

/// 預設回溯天數
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;
