//! Writer records and their parameter types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A writer record, keyed by a store-assigned integer identifier.
///
/// Serialized field names are the canonical storage names (`image_url`,
/// not `imageUrl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Writer {
    /// Store-assigned identifier, immutable once assigned.
    pub id: i32,
    /// Display name, non-empty.
    pub name: String,
    /// Free-form biography.
    pub info: String,
    /// Portrait URL.
    pub image_url: String,
    /// Birth month (1-12 by convention; not range-checked).
    pub month: i32,
    /// Birth day-of-month (not range-checked).
    pub day: i32,
    /// Free-text labels, order preserved, membership semantics for search.
    pub tags: Vec<String>,
    /// Set by the store on insert.
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every update.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a writer. `name`, `month` and `day` are
/// validated upstream; `info`, `image_url` and `tags` carry defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWriter {
    /// Display name, already trimmed and non-empty.
    pub name: String,
    /// Free-form biography.
    #[serde(default)]
    pub info: String,
    /// Portrait URL.
    #[serde(default)]
    pub image_url: String,
    /// Birth month.
    pub month: i32,
    /// Birth day-of-month.
    pub day: i32,
    /// Free-text labels.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewWriter {
    /// Creates a new writer with the required fields and empty defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, month: i32, day: i32) -> Self {
        Self {
            name: name.into(),
            info: String::new(),
            image_url: String::new(),
            month,
            day,
            tags: Vec::new(),
        }
    }

    /// Sets the biography.
    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Sets the portrait URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// A sparse update: only `Some` fields are written. The store refreshes
/// `updated_at` even when every field is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriterUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New biography.
    pub info: Option<String>,
    /// New portrait URL.
    pub image_url: Option<String>,
    /// New birth month.
    pub month: Option<i32>,
    /// New birth day-of-month.
    pub day: Option<i32>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
}

impl WriterUpdate {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.info.is_none()
            && self.image_url.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.tags.is_none()
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the biography.
    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Sets the birth month.
    #[must_use]
    pub fn with_month(mut self, month: i32) -> Self {
        self.month = Some(month);
        self
    }

    /// Sets the birth day-of-month.
    #[must_use]
    pub fn with_day(mut self, day: i32) -> Self {
        self.day = Some(day);
        self
    }

    /// Sets the replacement tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Conjunctive list/search filter. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriterFilter {
    /// Case-insensitive substring match against `name`.
    pub search: Option<String>,
    /// Exact birth-month match.
    pub month: Option<i32>,
    /// Exact birth-day match.
    pub day: Option<i32>,
    /// Tag membership test (exact, case-sensitive).
    pub tag: Option<String>,
}

impl WriterFilter {
    /// Creates an empty filter matching every writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name substring to search for.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the exact birth month.
    #[must_use]
    pub fn with_month(mut self, month: i32) -> Self {
        self.month = Some(month);
        self
    }

    /// Sets the exact birth day.
    #[must_use]
    pub fn with_day(mut self, day: i32) -> Self {
        self.day = Some(day);
        self
    }

    /// Sets the tag to test membership for.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns `true` if no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.month.is_none() && self.day.is_none() && self.tag.is_none()
    }

    /// Returns `true` if the writer satisfies every set criterion.
    ///
    /// This is the reference semantics the SQL backend mirrors with
    /// `ILIKE`, `=` and `= ANY(tags)` clauses.
    #[must_use]
    pub fn matches(&self, writer: &Writer) -> bool {
        if let Some(search) = &self.search {
            if !writer
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if let Some(month) = self.month {
            if writer.month != month {
                return false;
            }
        }
        if let Some(day) = self.day {
            if writer.day != day {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !writer.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(name: &str, month: i32, day: i32, tags: &[&str]) -> Writer {
        let now = Utc::now();
        Writer {
            id: 1,
            name: name.to_string(),
            info: String::new(),
            image_url: String::new(),
            month,
            day,
            tags: tags.iter().map(ToString::to_string).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = WriterFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&writer("Anna Akhmatova", 6, 23, &[])));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let w = writer("Fyodor Dostoevsky", 11, 11, &[]);
        assert!(WriterFilter::new().with_search("dostoev").matches(&w));
        assert!(WriterFilter::new().with_search("FYODOR").matches(&w));
        assert!(!WriterFilter::new().with_search("tolstoy").matches(&w));
    }

    #[test]
    fn test_filters_combine_conjunctively() {
        let w = writer("Marina Tsvetaeva", 10, 8, &["poet"]);
        assert!(WriterFilter::new()
            .with_month(10)
            .with_day(8)
            .with_tag("poet")
            .matches(&w));
        assert!(!WriterFilter::new().with_month(10).with_day(9).matches(&w));
    }

    #[test]
    fn test_tag_membership_is_exact() {
        let w = writer("Anton Chekhov", 1, 29, &["playwright", "prose"]);
        assert!(WriterFilter::new().with_tag("prose").matches(&w));
        assert!(!WriterFilter::new().with_tag("Prose").matches(&w));
        assert!(!WriterFilter::new().with_tag("poet").matches(&w));
    }

    #[test]
    fn test_update_is_empty() {
        assert!(WriterUpdate::default().is_empty());
        assert!(!WriterUpdate::default().with_info("bio").is_empty());
    }

    #[test]
    fn test_writer_serializes_storage_field_names() {
        let json = serde_json::to_value(writer("Anna", 6, 12, &["poet"])).unwrap();
        assert!(json.get("image_url").is_some());
        assert!(json.get("imageUrl").is_none());
        assert_eq!(json["tags"], serde_json::json!(["poet"]));
    }
}
