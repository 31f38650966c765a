use maud::{html, Markup};

use crate::{AddRequest, RecordSort};

/// Add-record form, refilled with the last submission after an error
pub fn add_form(values: Option<&AddRequest>, sort: RecordSort) -> Markup {
    let action = format!("/add?{}", sort.query_string());
    let requested_date = values.map(|v| v.requested_date.clone()).unwrap_or_default();
    let country = values.map(|v| v.country.clone()).unwrap_or_default();
    let city = values.map(|v| v.city.clone()).unwrap_or_default();
    let region = values.and_then(|v| v.region.clone()).unwrap_or_default();

    html! {
        div class="box" {
            h2 class="title is-5" { "Add a day" }
            form method="post" action=(action) {
                div class="columns is-multiline" {
                    div class="column is-3" {
                        label class="label" for="requested_date" { "Date" }
                        input class="input" type="date" id="requested_date" name="requested_date"
                              placeholder="YYYY-MM-DD" required
                              value=(requested_date);
                    }
                    div class="column is-3" {
                        label class="label" for="country" { "Country" }
                        input class="input" type="text" id="country" name="country" required
                              value=(country);
                    }
                    div class="column is-3" {
                        label class="label" for="city" { "City" }
                        input class="input" type="text" id="city" name="city" required
                              value=(city);
                    }
                    div class="column is-3" {
                        label class="label" for="region" { "State / region (optional)" }
                        input class="input" type="text" id="region" name="region"
                              value=(region);
                    }
                }
                button class="button is-primary" type="submit" { "Add" }
            }
        }
    }
}
