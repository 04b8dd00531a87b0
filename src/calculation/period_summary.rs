use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::declare::{DailyPriceRecord, Outcome, Period, PriceSeries};

/// 單一週期的最高價、最低價與平均收盤價
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    /// 週期的最後一天
    pub period_end: NaiveDate,
    /// 週期內 `high` 的最大值
    pub high: Decimal,
    /// 週期內 `low` 的最小值
    pub low: Decimal,
    /// 週期內 `close` 的算術平均
    pub average: Decimal,
}

/// 月、季、年三種彙總
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct PeriodTables {
    pub monthly: Vec<PeriodSummary>,
    pub quarterly: Vec<PeriodSummary>,
    pub yearly: Vec<PeriodSummary>,
}

impl PeriodTables {
    pub fn get(&self, period: Period) -> &[PeriodSummary] {
        match period {
            Period::Month => &self.monthly,
            Period::Quarter => &self.quarterly,
            Period::Year => &self.yearly,
        }
    }
}

/// 累加中的週期
struct Bucket {
    period_end: NaiveDate,
    high: Decimal,
    low: Decimal,
    close_sum: Decimal,
    count: u32,
}

impl Bucket {
    fn new(period_end: NaiveDate, record: &DailyPriceRecord) -> Self {
        Bucket {
            period_end,
            high: record.high,
            low: record.low,
            close_sum: record.close,
            count: 1,
        }
    }

    fn add(&mut self, record: &DailyPriceRecord) {
        self.high = self.high.max(record.high);
        self.low = self.low.min(record.low);
        self.close_sum += record.close;
        self.count += 1;
    }

    fn finish(self) -> PeriodSummary {
        PeriodSummary {
            period_end: self.period_end,
            high: self.high,
            low: self.low,
            average: self.close_sum / Decimal::from(self.count),
        }
    }
}

/// 將每日行情依日曆週期分組，每個有資料的週期產生一筆彙總，依週期結束日遞增
pub fn summarize_period(series: &PriceSeries, period: Period) -> Vec<PeriodSummary> {
    let mut summaries = Vec::new();
    let mut current: Option<Bucket> = None;

    // PriceSeries 已依日期排序，同一週期的資料必定相鄰
    for record in series.records() {
        let period_end = period.period_end(record.date);
        match current.as_mut() {
            Some(bucket) if bucket.period_end == period_end => bucket.add(record),
            _ => {
                if let Some(done) = current.replace(Bucket::new(period_end, record)) {
                    summaries.push(done.finish());
                }
            }
        }
    }

    if let Some(done) = current {
        summaries.push(done.finish());
    }

    summaries
}

/// 計算月、季、年彙總；空的序列得到三張空表
pub fn aggregate(series: &PriceSeries) -> PeriodTables {
    PeriodTables {
        monthly: summarize_period(series, Period::Month),
        quarterly: summarize_period(series, Period::Quarter),
        yearly: summarize_period(series, Period::Year),
    }
}

/// 行情無法取得時不做任何計算
pub fn summarize(series: &Outcome<PriceSeries>) -> Outcome<PeriodTables> {
    match series.as_ref() {
        Outcome::Ready(series) => Outcome::Ready(aggregate(series)),
        Outcome::Empty => Outcome::Ready(PeriodTables::default()),
        Outcome::Unavailable => Outcome::Unavailable,
    }
}
