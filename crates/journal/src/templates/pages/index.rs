use maud::{html, Markup};

use crate::{
    templates::{
        fragments::{add_form, notification, records_table, Notice},
        layouts::{base, PageConfig},
    },
    AddRequest, RecordSort, WeatherRecord,
};

pub struct IndexView<'a> {
    pub records: &'a [WeatherRecord],
    pub sort: RecordSort,
    pub notice: Option<Notice>,
    /// Last submission, shown again when it failed
    pub submitted: Option<&'a AddRequest>,
}

/// Home page: the add form above the saved records
pub fn index_page(view: &IndexView) -> Markup {
    let config = PageConfig {
        title: "Weather Database",
    };

    base(
        &config,
        html! {
            @if let Some(notice) = &view.notice {
                (notification(notice))
            }
            (add_form(view.submitted, view.sort))
            (records_table(view.records, view.sort))
        },
    )
}
