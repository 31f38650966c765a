use maud::{html, Markup};

use super::record_row::record_row;
use crate::{RecordSort, SortColumn, WeatherRecord};

const HEADERS: [(SortColumn, &str); 10] = [
    (SortColumn::Id, "ID"),
    (SortColumn::RequestedDate, "Date"),
    (SortColumn::City, "City"),
    (SortColumn::Country, "Country"),
    (SortColumn::TempMaxC, "Max \u{b0}C"),
    (SortColumn::TempMinC, "Min \u{b0}C"),
    (SortColumn::PrecipMm, "Precip mm"),
    (SortColumn::WindMaxKmh, "Wind km/h"),
    (SortColumn::Source, "Source"),
    (SortColumn::CreatedAt, "Saved"),
];

pub fn records_table(records: &[WeatherRecord], sort: RecordSort) -> Markup {
    html! {
        div class="box" {
            h2 class="title is-5" { "Saved records" }

            @if records.is_empty() {
                div class="has-text-centered has-text-grey py-6" {
                    p class="is-size-5" { "No records yet" }
                    p class="is-size-7" { "Add a date and place above to look up its weather." }
                }
            } @else {
                div class="table-container" {
                    table class="table is-fullwidth is-striped is-hoverable" {
                        thead {
                            tr {
                                @for (column, label) in HEADERS {
                                    th { (sort_header(sort, column, label)) }
                                }
                                th { "" }
                            }
                        }
                        tbody id="records-tbody" {
                            @for record in records {
                                (record_row(record, sort))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn sort_header(sort: RecordSort, column: SortColumn, label: &str) -> Markup {
    let target = RecordSort {
        column,
        direction: sort.next_direction(column),
    };
    let href = format!("?{}", target.query_string());
    let marker = match (sort.column == column, sort.direction) {
        (true, crate::SortDirection::Asc) => " \u{25b2}",
        (true, crate::SortDirection::Desc) => " \u{25bc}",
        (false, _) => "",
    };
    html! {
        a href=(href) { (label) (marker) }
    }
}
