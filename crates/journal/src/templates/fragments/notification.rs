use maud::{html, Markup};

/// One-line banner shown above the records table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    /// Banner for the `?notice=` value set by redirects
    pub fn from_query(notice: &str) -> Option<Self> {
        match notice {
            "added" => Some(Notice::Success("Weather record added.".to_string())),
            "deleted" => Some(Notice::Success("Record deleted.".to_string())),
            _ => None,
        }
    }
}

pub fn notification(notice: &Notice) -> Markup {
    let (class, message) = match notice {
        Notice::Success(message) => ("notification is-success is-light", message),
        Notice::Error(message) => ("notification is-danger is-light", message),
    };
    html! {
        div class=(class) role="status" {
            (message)
        }
    }
}
