use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::{
    calculation::period_summary,
    config::App,
    crawler::{
        alphavantage::{self, DEFAULT_LOOKBACK_DAYS},
        newsapi,
    },
    logging,
    util::datetime,
    web::{
        page::{IndexPage, LookupForm},
        AppError,
    },
};

fn render(page: &IndexPage) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}

/// GET / - 空白表單
pub async fn index() -> Result<Html<String>, AppError> {
    render(&IndexPage::blank())
}

/// POST / - 依序抓新聞、抓行情，彙總後輸出頁面
pub async fn submit(
    State(settings): State<Arc<App>>,
    Form(form): Form<LookupForm>,
) -> Result<Response, AppError> {
    let from = match datetime::parse_iso_date(&form.date) {
        Ok(date) => date,
        Err(why) => {
            logging::info_file_async(format!("Reject form because {:?}", why));
            let page = IndexPage::invalid(form, "Date must be in YYYY-MM-DD format.");
            return Ok((StatusCode::BAD_REQUEST, render(&page)?).into_response());
        }
    };

    let news =
        newsapi::everything::fetch_articles(&settings.news_api, &form.company_name, from).await;
    let prices = alphavantage::daily::fetch_daily_series(
        &settings.alpha_vantage,
        &form.symbol,
        DEFAULT_LOOKBACK_DAYS,
    )
    .await;

    if prices.is_unavailable() {
        logging::warn_file_async(format!("No price data for {}", form.symbol));
    }

    let tables = period_summary::summarize(&prices);
    let page = IndexPage::result(form, news, tables);

    Ok(render(&page)?.into_response())
}
