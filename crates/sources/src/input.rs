use time::{macros::format_description, Date};

use crate::Error;

/// Parse a calendar date given as `YYYY-MM-DD`
pub fn parse_target_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();
    Date::parse(text, format_description!("[year]-[month]-[day]")).map_err(|e| {
        Error::invalid_input("date", format!("'{}' is not a YYYY-MM-DD date ({})", text, e))
    })
}

/// ISO `YYYY-MM-DD` form, matching the strings in upstream daily series
pub fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parse a latitude/longitude pair submitted as text
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Result<(f64, f64), Error> {
    let lat = parse_coordinate("latitude", latitude, 90.0)?;
    let lon = parse_coordinate("longitude", longitude, 180.0)?;
    Ok((lat, lon))
}

fn parse_coordinate(field: &'static str, text: &str, bound: f64) -> Result<f64, Error> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::invalid_input(field, format!("'{}' is not a number", text)))?;
    if !value.is_finite() || value.abs() > bound {
        return Err(Error::invalid_input(
            field,
            format!("{} is outside [-{}, {}]", value, bound, bound),
        ));
    }
    Ok(value)
}
