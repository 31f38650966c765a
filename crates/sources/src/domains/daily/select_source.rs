use time::Date;

use crate::DataSource;

/// Largest look-back the forecast source is trusted for. The archive
/// (reanalysis) source lags by several days, so dates up to this many days
/// old are read from the forecast source's `past_days` window instead.
pub const FORECAST_LOOK_BACK_DAYS: i64 = 7;

/// Which upstream query serves a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceQuery {
    /// Near-term forecast API, optionally reaching `past_days` back
    Forecast { past_days: Option<u32> },
    /// Historical archive API for exactly one day
    Archive { date: Date },
}

impl SourceQuery {
    pub fn source(&self) -> DataSource {
        match self {
            SourceQuery::Forecast { .. } => DataSource::Forecast,
            SourceQuery::Archive { .. } => DataSource::Historical,
        }
    }
}

/// Whole days from `target` to `today`; negative for future dates
pub fn days_back(target: Date, today: Date) -> i64 {
    (today - target).whole_days()
}

/// Strict three-way split on `days_back`:
/// `<= 0` forecast, `1..=7` forecast with `past_days`, `>= 8` archive.
pub fn select_source(target: Date, today: Date) -> SourceQuery {
    match days_back(target, today) {
        back if back <= 0 => SourceQuery::Forecast { past_days: None },
        back @ 1..=FORECAST_LOOK_BACK_DAYS => SourceQuery::Forecast {
            past_days: Some(back as u32),
        },
        _ => SourceQuery::Archive { date: target },
    }
}
