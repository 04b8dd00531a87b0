//! # News API 新聞採集模組
//!
//! 透過 News API 的 `everything` 端點，以公司名稱搜尋指定日期之後的新聞。
//!
//! ## 站點資訊
//!
//! - 來源域名：`newsapi.org`（可由設定檔覆寫）
//! - 存取方式：HTTP GET 搭配 `apiKey` 查詢參數
//! - 主要端點：`/v2/everything`

/// 新聞搜尋子模組
pub mod everything;

/// 每次最多回傳的新聞筆數，沿用來源的排序
pub const MAX_ARTICLES: usize = 10;
