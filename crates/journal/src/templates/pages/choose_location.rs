use maud::{html, Markup};
use weather_sources::GeoCandidate;

use crate::templates::layouts::{base, PageConfig};

/// Disambiguation page; each candidate re-posts the original request with coordinates
pub fn choose_location_page(
    requested_date: &str,
    city: &str,
    country: &str,
    candidates: &[GeoCandidate],
) -> Markup {
    let config = PageConfig {
        title: "Weather Database - Choose a location",
    };

    base(
        &config,
        html! {
            div class="box" {
                h2 class="title is-5" { "Choose a location" }
                p class="mb-4" {
                    "Several places match " strong { (city) ", " (country) } ". Pick one to look up "
                    (requested_date) "."
                }

                div class="table-container" {
                    table class="table is-fullwidth is-hoverable" {
                        thead {
                            tr {
                                th { "Name" }
                                th { "Region" }
                                th { "Country" }
                                th { "Coordinates" }
                                th { "Timezone" }
                                th { "" }
                            }
                        }
                        tbody {
                            @for candidate in candidates {
                                tr {
                                    td { (candidate.name) }
                                    td { (candidate.region.as_deref().unwrap_or_default()) }
                                    td { (candidate.country) }
                                    td class="is-size-7" {
                                        (format!("{:.4}, {:.4}", candidate.latitude, candidate.longitude))
                                    }
                                    td class="is-size-7" { (candidate.timezone) }
                                    td {
                                        form method="post" action="/add" {
                                            input type="hidden" name="requested_date" value=(requested_date);
                                            input type="hidden" name="city" value=(city);
                                            input type="hidden" name="country" value=(country);
                                            input type="hidden" name="lat" value=(candidate.latitude.to_string());
                                            input type="hidden" name="lon" value=(candidate.longitude.to_string());
                                            input type="hidden" name="timezone" value=(candidate.timezone);
                                            button class="button is-small is-primary" type="submit" {
                                                "Use this location"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                a href="/" class="button is-light" { "Cancel" }
            }
        },
    )
}
