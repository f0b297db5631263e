use utoipa::IntoParams;

use crate::validation::{ValidationError, non_empty, require_field};

/// Query string accepted by `/generate-ics`.
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReservationQuery {
    /// Event title; falls back to the configured default summary
    pub summary: Option<String>,
    /// Check-in date, `YYYY-MM-DD`
    #[param(example = "2024-01-10")]
    pub dtstart: Option<String>,
    /// Check-out date, `YYYY-MM-DD`
    #[param(example = "2024-01-12")]
    pub dtend: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Inserted into the calendar as-is
    pub url: Option<String>,
}

/// Collects raw query pairs. The first occurrence of a key wins, unknown keys are ignored.
impl FromIterator<(String, String)> for ReservationQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "summary" => &mut query.summary,
                "dtstart" => &mut query.dtstart,
                "dtend" => &mut query.dtend,
                "location" => &mut query.location,
                "description" => &mut query.description,
                "url" => &mut query.url,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub summary: String,
    pub dtstart: String,
    pub dtend: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl EventRecord {
    pub fn from_query(
        query: ReservationQuery,
        default_summary: &str,
    ) -> Result<Self, ValidationError> {
        let dtstart = require_field("dtstart", query.dtstart)?;
        let dtend = require_field("dtend", query.dtend)?;

        Ok(Self {
            summary: non_empty(query.summary).unwrap_or_else(|| default_summary.to_string()),
            dtstart,
            dtend,
            location: non_empty(query.location),
            description: non_empty(query.description),
            url: non_empty(query.url),
        })
    }
}
