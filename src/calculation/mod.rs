/// 每日行情的月、季、年彙總
pub mod period_summary;
