use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::datetime;

/// 外部資料來源的取得結果
///
/// 取代以 `None` 或空集合表達失敗的做法，呼叫端必須處理每一種情況。
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// 成功取得資料
    Ready(T),
    /// 來源正常回應，但沒有資料
    Empty,
    /// 來源無法提供資料（連線失敗、非預期的回應內容等）
    Unavailable,
}

impl<T> Outcome<T> {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Outcome::Unavailable)
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Ready(t) => Outcome::Ready(t),
            Outcome::Empty => Outcome::Empty,
            Outcome::Unavailable => Outcome::Unavailable,
        }
    }
}

impl<T: Default> Outcome<T> {
    /// `Empty` 與 `Unavailable` 都回傳預設值
    pub fn unwrap_or_default(self) -> T {
        match self {
            Outcome::Ready(t) => t,
            Outcome::Empty | Outcome::Unavailable => T::default(),
        }
    }
}

/// 彙總的週期
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Period {
    /// 月
    Month,
    /// 季
    Quarter,
    /// 年
    Year,
}

impl Period {
    pub fn name(&self) -> &'static str {
        match *self {
            Period::Month => "Monthly",
            Period::Quarter => "Quarterly",
            Period::Year => "Yearly",
        }
    }

    /// 日期所屬週期的最後一天
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Month => datetime::month_end(date),
            Period::Quarter => datetime::quarter_end(date),
            Period::Year => datetime::year_end(date),
        }
    }

    pub fn iterator() -> impl Iterator<Item = Self> {
        [Self::Month, Self::Quarter, Self::Year].iter().copied()
    }
}

/// 新聞
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NewsArticle {
    pub title: String,
    pub source_name: String,
    pub url: String,
    pub published_at: String,
    pub description: String,
}

/// 單日行情 (OHLCV)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyPriceRecord {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
}

/// 依日期遞增排列、日期不重複的每日行情
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    records: Vec<DailyPriceRecord>,
}

impl PriceSeries {
    pub fn new(mut records: Vec<DailyPriceRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        records.dedup_by_key(|r| r.date);
        PriceSeries { records }
    }

    /// 只保留 `cutoff`（不含）之後的資料
    pub fn since(records: Vec<DailyPriceRecord>, cutoff: NaiveDate) -> Self {
        let mut series = Self::new(records);
        series.records.retain(|r| r.date > cutoff);
        series
    }

    pub fn records(&self) -> &[DailyPriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
