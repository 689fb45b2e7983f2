//! Wire types for the writers API.
//!
//! Request bodies accept the client field names (`imageUrl`); responses
//! use the canonical storage names carried by
//! [`Writer`](almanack_core::Writer) itself.

use serde::{Deserialize, Serialize};

use almanack_core::{Error, NewWriter, Result, WriterFilter, WriterUpdate};

/// Body accepted by the create operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWriterRequest {
    /// Display name; required, trimmed before validation.
    #[serde(default)]
    pub name: Option<String>,
    /// Biography; defaults to empty.
    #[serde(default)]
    pub info: Option<String>,
    /// Portrait URL; defaults to empty.
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    /// Birth month; required.
    #[serde(default)]
    pub month: Option<i32>,
    /// Birth day-of-month; required.
    #[serde(default)]
    pub day: Option<i32>,
    /// Tags; default to an empty list.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl CreateWriterRequest {
    /// Validates the body and converts it into a [`NewWriter`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if the trimmed name is empty or month
    /// or day is missing.
    pub fn into_new_writer(self) -> Result<NewWriter> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .unwrap_or_default();

        let (month, day) = match (self.month, self.day) {
            (Some(month), Some(day)) if !name.is_empty() => (month, day),
            _ => return Err(Error::validation("Name, month and day are required")),
        };

        Ok(NewWriter {
            name,
            info: self.info.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
            month,
            day,
            tags: self.tags.unwrap_or_default(),
        })
    }
}

/// Body accepted by the update operation. Only present keys are written;
/// `null` is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWriterRequest {
    /// Id of the writer to update; required.
    #[serde(default)]
    pub id: Option<i32>,
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New biography.
    #[serde(default)]
    pub info: Option<String>,
    /// New portrait URL.
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    /// New birth month.
    #[serde(default)]
    pub month: Option<i32>,
    /// New birth day-of-month.
    #[serde(default)]
    pub day: Option<i32>,
    /// Replacement tag list.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl UpdateWriterRequest {
    /// Validates the body and splits it into the target id and the
    /// sparse update.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `id` is missing.
    pub fn into_parts(self) -> Result<(i32, WriterUpdate)> {
        let Some(id) = self.id else {
            return Err(Error::validation("Writer ID is required"));
        };

        let update = WriterUpdate {
            name: self.name,
            info: self.info,
            image_url: self.image_url,
            month: self.month,
            day: self.day,
            tags: self.tags,
        };
        Ok((id, update))
    }
}

/// Query parameters accepted by the list/search operation. Numeric
/// parameters arrive as strings and are validated explicitly so a bad
/// value is a 400, not a 500.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Substring to search names for.
    pub search: Option<String>,
    /// Exact birth-month match.
    pub month: Option<String>,
    /// Exact birth-day match.
    pub day: Option<String>,
    /// Tag membership test.
    pub tag: Option<String>,
}

impl ListParams {
    /// Validates the parameters and converts them into a [`WriterFilter`].
    /// Empty strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `month` or `day` is not an integer.
    pub fn into_filter(self) -> Result<WriterFilter> {
        let mut filter = WriterFilter::new();

        if let Some(search) = self.search {
            let search = search.trim();
            if !search.is_empty() {
                filter.search = Some(search.to_string());
            }
        }
        filter.month = parse_numeric("month", self.month)?;
        filter.day = parse_numeric("day", self.day)?;
        if let Some(tag) = self.tag {
            if !tag.is_empty() {
                filter.tag = Some(tag);
            }
        }

        Ok(filter)
    }
}

/// Query parameters accepted by the delete operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteParams {
    /// Id of the writer to delete; required.
    pub id: Option<String>,
}

impl DeleteParams {
    /// Validates the parameters and returns the target id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `id` is missing, empty, or not an
    /// integer.
    pub fn writer_id(&self) -> Result<i32> {
        let Some(id) = self.id.as_deref().filter(|v| !v.is_empty()) else {
            return Err(Error::validation("Writer ID is required"));
        };
        id.parse()
            .map_err(|_| Error::validation("id must be an integer"))
    }
}

fn parse_numeric(field: &str, value: Option<String>) -> Result<Option<i32>> {
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| Error::validation(format!("{field} must be an integer"))),
    }
}

/// JSON error body returned by every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Caller-facing message.
    pub error: String,
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always `true`.
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_client_field_names() {
        let json = r#"{
            "name": "Anna Akhmatova",
            "info": "Silver Age poet",
            "imageUrl": "https://example.org/akhmatova.jpg",
            "month": 6,
            "day": 23,
            "tags": ["poet"]
        }"#;

        let req: CreateWriterRequest = serde_json::from_str(json).unwrap();
        let writer = req.into_new_writer().unwrap();
        assert_eq!(writer.name, "Anna Akhmatova");
        assert_eq!(writer.image_url, "https://example.org/akhmatova.jpg");
        assert_eq!(writer.tags, vec!["poet".to_string()]);
    }

    #[test]
    fn test_create_request_trims_name_and_defaults_optionals() {
        let json = r#"{"name": "  Gogol  ", "month": 4, "day": 1}"#;
        let req: CreateWriterRequest = serde_json::from_str(json).unwrap();
        let writer = req.into_new_writer().unwrap();
        assert_eq!(writer.name, "Gogol");
        assert_eq!(writer.info, "");
        assert_eq!(writer.image_url, "");
        assert!(writer.tags.is_empty());
    }

    #[test]
    fn test_create_request_requires_name_month_day() {
        for json in [
            r#"{"name": "", "month": 1, "day": 1}"#,
            r#"{"name": "   ", "month": 1, "day": 1}"#,
            r#"{"name": "X", "day": 1}"#,
            r#"{"name": "X", "month": 1}"#,
            r"{}",
        ] {
            let req: CreateWriterRequest = serde_json::from_str(json).unwrap();
            let err = req.into_new_writer().unwrap_err();
            assert_eq!(err.to_string(), "Name, month and day are required");
        }
    }

    #[test]
    fn test_update_request_requires_id() {
        let req: UpdateWriterRequest =
            serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        let err = req.into_parts().unwrap_err();
        assert_eq!(err.to_string(), "Writer ID is required");
    }

    #[test]
    fn test_update_request_keeps_only_present_fields() {
        let req: UpdateWriterRequest =
            serde_json::from_str(r#"{"id": 3, "imageUrl": "x.png"}"#).unwrap();
        let (id, update) = req.into_parts().unwrap();
        assert_eq!(id, 3);
        assert_eq!(update.image_url.as_deref(), Some("x.png"));
        assert!(update.name.is_none());
        assert!(update.tags.is_none());
    }

    #[test]
    fn test_id_only_update_is_a_valid_empty_update() {
        let req: UpdateWriterRequest = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        let (id, update) = req.into_parts().unwrap();
        assert_eq!(id, 5);
        assert!(update.is_empty());
    }

    #[test]
    fn test_list_params_skip_empty_values() {
        let params = ListParams {
            search: Some("  ".to_string()),
            month: Some(String::new()),
            day: None,
            tag: Some(String::new()),
        };
        let filter = params.into_filter().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_list_params_reject_non_numeric_month() {
        let params = ListParams {
            month: Some("abc".to_string()),
            ..ListParams::default()
        };
        let err = params.into_filter().unwrap_err();
        assert_eq!(err.to_string(), "month must be an integer");
    }

    #[test]
    fn test_delete_params_require_id() {
        assert_eq!(
            DeleteParams::default().writer_id().unwrap_err().to_string(),
            "Writer ID is required"
        );
        let params = DeleteParams {
            id: Some("12".to_string()),
        };
        assert_eq!(params.writer_id().unwrap(), 12);
        let params = DeleteParams {
            id: Some("twelve".to_string()),
        };
        assert_eq!(
            params.writer_id().unwrap_err().to_string(),
            "id must be an integer"
        );
    }
}
