use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::{
    FieldErrors, FormFields,
    form::{invalid, non_blank, required, take_field},
};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct News {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub published_date: DateTime<Utc>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewsForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub published_date: Option<String>,
}

/// Validated news fields. `published_date` is `None` when the form left it
/// unset, in which case an edit keeps the stored date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsInput {
    pub title: String,
    pub content: String,
    pub published_date: Option<DateTime<Utc>>,
}

impl NewsForm {
    pub fn from_fields(mut fields: FormFields) -> Self {
        Self {
            id: take_field(&mut fields, "Id"),
            title: take_field(&mut fields, "Title"),
            content: take_field(&mut fields, "Content"),
            published_date: take_field(&mut fields, "PublishedDate"),
        }
    }

    pub fn id(&self) -> Option<i32> {
        non_blank(&self.id).and_then(|v| v.parse().ok())
    }

    pub fn validate(&self) -> Result<NewsInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = non_blank(&self.title).map(str::to_string);
        if title.is_none() {
            required("Title", &mut errors);
        }

        let content = non_blank(&self.content).map(str::to_string);
        if content.is_none() {
            required("Content", &mut errors);
        }

        let published_date = match parse_published_date(self.published_date.as_deref()) {
            Ok(date) => date,
            Err(_) => {
                invalid("PublishedDate", &mut errors);
                None
            }
        };

        match (title, content) {
            (Some(title), Some(content)) if errors.is_empty() => Ok(NewsInput {
                title,
                content,
                published_date,
            }),
            _ => Err(errors),
        }
    }
}

/// Parses a submitted publish date. Blank input and the `0001-01-01T00:00:00`
/// sentinel both mean "unset".
pub fn parse_published_date(
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
        })
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").map(|dt| dt.and_utc()))
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
        })?;

    if is_unset_sentinel(&parsed) {
        return Ok(None);
    }

    Ok(Some(parsed))
}

fn is_unset_sentinel(date: &DateTime<Utc>) -> bool {
    date.year() == 1 && date.ordinal() == 1 && date.num_seconds_from_midnight() == 0
}

#[derive(Debug, Serialize)]
pub struct NewsFormView {
    pub form: NewsForm,
    pub errors: FieldErrors,
}
