use askama::Template;
use serde::Deserialize;

use crate::{
    calculation::period_summary::{PeriodSummary, PeriodTables},
    declare::{NewsArticle, Outcome, Period},
};

/// 表單欄位，三個欄位都必填
#[derive(Deserialize, Debug, Default, Clone)]
pub struct LookupForm {
    pub company_name: String,
    pub date: String,
    pub symbol: String,
}

/// 表格的一列，數值已轉成顯示用的字串
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub date: String,
    pub high: String,
    pub low: String,
    pub average: String,
}

impl From<&PeriodSummary> for SummaryRow {
    fn from(summary: &PeriodSummary) -> Self {
        SummaryRow {
            date: summary.period_end.format("%Y-%m-%d").to_string(),
            high: summary.high.normalize().to_string(),
            low: summary.low.normalize().to_string(),
            average: summary.average.round_dp(4).normalize().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryTable {
    pub title: &'static str,
    pub rows: Vec<SummaryRow>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub form: LookupForm,
    pub submitted: bool,
    pub error: Option<String>,
    pub articles: Vec<NewsArticle>,
    pub prices_available: bool,
    pub tables: Vec<SummaryTable>,
}

impl IndexPage {
    /// 尚未送出的空白表單
    pub fn blank() -> Self {
        IndexPage {
            form: LookupForm::default(),
            submitted: false,
            error: None,
            articles: Vec::new(),
            prices_available: false,
            tables: Vec::new(),
        }
    }

    /// 表單內容有誤，保留使用者輸入並顯示訊息
    pub fn invalid(form: LookupForm, message: impl Into<String>) -> Self {
        IndexPage {
            form,
            error: Some(message.into()),
            ..Self::blank()
        }
    }

    /// 查詢結果；新聞與價格各自可能沒有資料
    pub fn result(
        form: LookupForm,
        news: Outcome<Vec<NewsArticle>>,
        tables: Outcome<PeriodTables>,
    ) -> Self {
        let (prices_available, tables) = match tables {
            Outcome::Ready(tables) => (
                true,
                Period::iterator()
                    .map(|period| SummaryTable {
                        title: period.name(),
                        rows: tables.get(period).iter().map(SummaryRow::from).collect(),
                    })
                    .collect(),
            ),
            Outcome::Empty | Outcome::Unavailable => (false, Vec::new()),
        };

        IndexPage {
            form,
            submitted: true,
            error: None,
            articles: news.unwrap_or_default(),
            prices_available,
            tables,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    fn form() -> LookupForm {
        LookupForm {
            company_name: "Apple".to_string(),
            date: "2024-03-01".to_string(),
            symbol: "AAPL".to_string(),
        }
    }

    fn summary() -> PeriodSummary {
        PeriodSummary {
            period_end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            high: dec!(189.5000),
            low: dec!(170.1200),
            average: dec!(100) / dec!(3),
        }
    }

    #[test]
    fn test_summary_row() {
        let row = SummaryRow::from(&summary());
        assert_eq!(
            row,
            SummaryRow {
                date: "2024-03-31".to_string(),
                high: "189.5".to_string(),
                low: "170.12".to_string(),
                average: "33.3333".to_string(),
            }
        );
    }

    #[test]
    fn test_result_with_prices() {
        let tables = PeriodTables {
            monthly: vec![summary()],
            quarterly: vec![summary()],
            yearly: vec![],
        };
        let page = IndexPage::result(form(), Outcome::Empty, Outcome::Ready(tables));

        assert!(page.submitted);
        assert!(page.prices_available);
        assert!(page.articles.is_empty());
        let titles: Vec<&str> = page.tables.iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Monthly", "Quarterly", "Yearly"]);
        assert_eq!(page.tables[0].rows.len(), 1);
        assert!(page.tables[2].rows.is_empty());
    }

    #[test]
    fn test_result_without_prices() {
        let news = Outcome::Ready(vec![NewsArticle {
            title: "Apple ships".to_string(),
            ..Default::default()
        }]);
        let page = IndexPage::result(form(), news, Outcome::Unavailable);

        assert!(!page.prices_available);
        assert!(page.tables.is_empty());
        assert_eq!(page.articles.len(), 1);
    }

    #[test]
    fn test_render_escapes_html() {
        let news = Outcome::Ready(vec![NewsArticle {
            title: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        }]);
        let html = IndexPage::result(form(), news, Outcome::Unavailable)
            .render()
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_blank() {
        let html = IndexPage::blank().render().unwrap();

        assert!(html.contains("name=\"company_name\""));
        assert!(html.contains("name=\"date\""));
        assert!(html.contains("name=\"symbol\""));
        assert!(!html.contains("No news articles found."));
    }
}
