//! 表單頁面：輸入公司名稱、日期與股票代號，顯示新聞與價格彙總表

mod error;
mod handlers;
mod page;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::config::App;

pub use error::AppError;

/// 建立網站的路由，設定值以 state 傳給每個請求
pub fn router(settings: Arc<App>) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .with_state(settings)
}
