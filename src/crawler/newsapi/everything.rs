use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    config::NewsApi,
    crawler::newsapi::MAX_ARTICLES,
    declare::{NewsArticle, Outcome},
    logging,
    util::http,
};

#[derive(Deserialize, Debug)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// News API 回傳的單篇新聞，欄位可能是 null
#[derive(Deserialize, Debug)]
struct Article {
    source: Option<Source>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Source {
    name: Option<String>,
}

impl From<Article> for NewsArticle {
    fn from(article: Article) -> Self {
        NewsArticle {
            title: article.title.unwrap_or_default(),
            source_name: article
                .source
                .and_then(|source| source.name)
                .unwrap_or_default(),
            url: article.url.unwrap_or_default(),
            published_at: article.published_at.unwrap_or_default(),
            description: article.description.unwrap_or_default(),
        }
    }
}

/// 搜尋 `from` 之後與 `query` 相關的新聞，依發布時間排序，最多 10 筆
///
/// 非 200 的回應視為沒有新聞；連線或解析失敗會記錄後回傳 `Unavailable`。
/// 兩者都不會讓錯誤往上拋。
pub async fn fetch_articles(
    cfg: &NewsApi,
    query: &str,
    from: NaiveDate,
) -> Outcome<Vec<NewsArticle>> {
    let query = query.trim();
    if query.is_empty() {
        return Outcome::Empty;
    }

    match visit(cfg, query, from).await {
        Ok(outcome) => outcome,
        Err(why) => {
            logging::error_file_async(format!(
                "Failed to fetch news({}) because {:?}",
                query, why
            ));
            Outcome::Unavailable
        }
    }
}

async fn visit(cfg: &NewsApi, query: &str, from: NaiveDate) -> Result<Outcome<Vec<NewsArticle>>> {
    let url = build_url(cfg, query, from);
    let response = http::get_response(&url).await?;
    let status = response.status();

    if status != StatusCode::OK {
        logging::info_file_async(format!(
            "News API answered {} for {}, no articles",
            status, query
        ));
        return Ok(Outcome::Empty);
    }

    let body = response
        .json::<EverythingResponse>()
        .await
        .map_err(|why| anyhow!("Error parsing news JSON: {:?}", why.without_url()))?;

    Ok(take_articles(body))
}

fn build_url(cfg: &NewsApi, query: &str, from: NaiveDate) -> String {
    format!(
        "{base}/v2/everything?q={query}&from={from}&sortBy=publishedAt&apiKey={key}",
        base = cfg.base_url.trim_end_matches('/'),
        query = urlencoding::encode(query),
        from = from.format("%Y-%m-%d"),
        key = urlencoding::encode(&cfg.api_key),
    )
}

fn take_articles(body: EverythingResponse) -> Outcome<Vec<NewsArticle>> {
    let articles: Vec<NewsArticle> = body
        .articles
        .into_iter()
        .take(MAX_ARTICLES)
        .map(NewsArticle::from)
        .collect();

    if articles.is_empty() {
        Outcome::Empty
    } else {
        Outcome::Ready(articles)
    }
}
