use maud::{html, Markup};
use time::{macros::format_description, OffsetDateTime};

use crate::{RecordSort, WeatherRecord};

/// Missing measurements render as an em dash
pub fn format_measurement(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.1}", value),
        None => "\u{2014}".to_string(),
    }
}

pub fn record_row(record: &WeatherRecord, sort: RecordSort) -> Markup {
    let delete_action = format!("/delete/{}?{}", record.id, sort.query_string());
    html! {
        tr {
            td { (record.id) }
            td { (weather_sources::iso_date(record.requested_date)) }
            td { (record.city) }
            td { (record.country) }
            td class="has-text-right" { (format_measurement(record.temp_max_c)) }
            td class="has-text-right" { (format_measurement(record.temp_min_c)) }
            td class="has-text-right" { (format_measurement(record.precip_mm)) }
            td class="has-text-right" { (format_measurement(record.wind_max_kmh)) }
            td {
                span class=(source_class(record)) { (record.source.as_str()) }
            }
            td class="is-size-7" {
                (format_saved_at(record.created_at))
            }
            td {
                form method="post" action=(delete_action) {
                    button class="button is-small is-danger is-light" type="submit" { "Delete" }
                }
            }
        }
    }
}

fn format_saved_at(at: OffsetDateTime) -> String {
    at.format(format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))
        .unwrap_or_default()
}

fn source_class(record: &WeatherRecord) -> &'static str {
    match record.source {
        weather_sources::DataSource::Historical => "tag is-info is-light",
        weather_sources::DataSource::Forecast => "tag is-warning is-light",
    }
}
