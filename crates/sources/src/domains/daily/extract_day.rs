use log::debug;
use serde::Deserialize;
use time::Date;

use crate::iso_date;

/// Daily variables requested from both the forecast and archive APIs
pub const DAILY_FIELDS: [&str; 4] = [
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "wind_speed_10m_max",
];

/// What to do when the target date is absent from the returned series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateMatch {
    /// Read the first entry instead (compatible behavior)
    #[default]
    FirstEntry,
    /// Refuse to guess
    Strict,
}

/// Top-level forecast/archive response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyPayload {
    #[serde(default)]
    pub daily: Option<DailySeries>,
}

/// Parallel, date-indexed daily series
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Vec<String>,
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
    pub precipitation_sum: Option<Vec<Option<f64>>>,
    pub wind_speed_10m_max: Option<Vec<Option<f64>>>,
}

/// The four values read for one day
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayValues {
    pub temp_max_c: Option<f64>,
    pub temp_min_c: Option<f64>,
    pub precip_mm: Option<f64>,
    pub wind_max_kmh: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// The `time` sequence was empty or missing
    EmptySeries,
    /// Target date absent under [`DateMatch::Strict`]
    DateNotFound,
}

/// Read a single day out of a daily series.
///
/// Missing series and out-of-range indexes yield `None` for that field only.
pub fn extract_day(
    series: &DailySeries,
    target: Date,
    date_match: DateMatch,
) -> Result<DayValues, ExtractError> {
    if series.time.is_empty() {
        return Err(ExtractError::EmptySeries);
    }

    let wanted = iso_date(target);
    let index = match series.time.iter().position(|day| *day == wanted) {
        Some(index) => index,
        None => match date_match {
            DateMatch::FirstEntry => {
                debug!(
                    "{} not in daily series starting {}, reading first entry",
                    wanted, series.time[0]
                );
                0
            }
            DateMatch::Strict => return Err(ExtractError::DateNotFound),
        },
    };

    Ok(DayValues {
        temp_max_c: value_at(&series.temperature_2m_max, index),
        temp_min_c: value_at(&series.temperature_2m_min, index),
        precip_mm: value_at(&series.precipitation_sum, index),
        wind_max_kmh: value_at(&series.wind_speed_10m_max, index),
    })
}

fn value_at(values: &Option<Vec<Option<f64>>>, index: usize) -> Option<f64> {
    values.as_ref()?.get(index).copied().flatten()
}
