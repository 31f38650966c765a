mod add_form;
mod notification;
mod record_row;
mod records_table;

pub use add_form::add_form;
pub use notification::{notification, Notice};
pub use record_row::{format_measurement, record_row};
pub use records_table::records_table;
