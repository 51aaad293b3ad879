use crate::models::{DailyUsage, MonthlyUsage};

pub fn monthly_usage() -> Vec<MonthlyUsage> {
    [("January", 20.0), ("February", 18.0), ("March", 25.0)]
        .into_iter()
        .map(|(month, usage)| MonthlyUsage {
            month: month.into(),
            usage,
        })
        .collect()
}

// Sample rows repeat; the same labels appear in every block.
const DAILY_ROWS: [(&str, f64); 25] = [
    ("Jan 1", 0.5),
    ("Jan 2", 1.2),
    ("Jan 3", 0.9),
    ("Mar 1", 0.4),
    ("Mar 31", 1.9),
    ("Jan 1", 0.5),
    ("Jan 2", 1.2),
    ("Jan 3", 0.9),
    ("Mar 1", 0.4),
    ("Mar 31", 1.9),
    ("Jan 1", 0.5),
    ("Jan 2", 1.2),
    ("Jan 3", 0.9),
    ("Mar 1", 0.0),
    ("Mar 31", 0.0),
    ("Jan 1", 0.0),
    ("Jan 2", 0.0),
    ("Jan 3", 0.9),
    ("Mar 1", 0.4),
    ("Mar 31", 1.9),
    ("Jan 1", 0.5),
    ("Jan 2", 1.2),
    ("Jan 3", 0.9),
    ("Mar 1", 0.4),
    ("Mar 31", 1.9),
];

pub fn daily_usage() -> Vec<DailyUsage> {
    DAILY_ROWS
        .iter()
        .map(|(day, usage)| DailyUsage {
            day: (*day).into(),
            usage: *usage,
        })
        .collect()
}
