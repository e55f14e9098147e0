//! Work history and education entries
//!
//! Quirks of the backend contract preserved here:
//! - create/update bodies wrap the item under `work` or `educations`
//! - the grade field is upper-case `CGPA`
//! - the backend may identify items by `_id` instead of `id`

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::YearMonth;

/// Kind of experience entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkCategory {
    #[default]
    Work,
    Project,
}

/// Work or project entry (`POST /user/work/`, `PUT /user/work`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct WorkItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Raw backend identifier, only read
    #[serde(rename = "_id", default, skip_serializing)]
    pub backend_id: Option<String>,
    pub category: WorkCategory,
    /// Company or project title
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// ISO 3166-1 alpha-2 code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub description: String,
    pub start_date: YearMonth,
    pub end_date: YearMonth,
}

impl WorkItem {
    /// Identifier as assigned by the backend, from `id` or `_id`.
    pub fn server_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.backend_id.as_deref())
    }
}

/// Education entry (`POST /user/education`, `PUT /user/education`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct EducationItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing)]
    pub backend_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    /// Grade on a 0-10 scale
    #[serde(rename = "CGPA", default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<YearMonth>,
    /// Absent while the user is still enrolled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<YearMonth>,
}

impl EducationItem {
    /// Identifier as assigned by the backend, from `id` or `_id`.
    pub fn server_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.backend_id.as_deref())
    }

    pub const fn is_enrolled(&self) -> bool {
        self.graduation_date.is_none()
    }
}

/// Body of `POST /user/work/`
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkPayload {
    pub work: WorkItem,
}

impl CreateWorkPayload {
    /// Wrap an item for creation. Any identifier is dropped.
    pub fn new(mut work: WorkItem) -> Self {
        work.id = None;
        work.backend_id = None;
        Self { work }
    }
}

/// Body of `PUT /user/work`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateWorkPayload {
    pub work: WorkItem,
}

impl UpdateWorkPayload {
    /// Wrap an item for update. Returns `None` when it has no identifier.
    pub fn new(mut work: WorkItem) -> Option<Self> {
        let id = work.server_id()?.to_string();
        work.id = Some(id);
        Some(Self { work })
    }
}

/// Body of `POST /user/education`, singular item under a plural key
#[derive(Debug, Clone, Serialize)]
pub struct CreateEducationPayload {
    pub educations: EducationItem,
}

impl CreateEducationPayload {
    pub fn new(mut educations: EducationItem) -> Self {
        educations.id = None;
        educations.backend_id = None;
        Self { educations }
    }
}

/// Body of `PUT /user/education`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateEducationPayload {
    pub educations: EducationItem,
}

impl UpdateEducationPayload {
    /// Returns `None` when the item has no identifier.
    pub fn new(mut educations: EducationItem) -> Option<Self> {
        let id = educations.server_id()?.to_string();
        educations.id = Some(id);
        Some(Self { educations })
    }
}

/// `{ "message": ... }` returned by delete endpoints
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn work() -> WorkItem {
        WorkItem {
            id: None,
            backend_id: None,
            category: WorkCategory::Work,
            name: "Acme".into(),
            role: Some("Engineer".into()),
            city: None,
            country: Some("IN".into()),
            description: String::new(),
            start_date: "2022-01".parse().unwrap(),
            end_date: "2023-06".parse().unwrap(),
        }
    }

    #[test]
    fn create_work_body_uses_work_key_without_id() {
        let mut item = work();
        item.id = Some("w1".into());
        let body = serde_json::to_value(CreateWorkPayload::new(item)).unwrap();

        assert_eq!(body["work"]["category"], "WORK");
        assert_eq!(body["work"]["start_date"], "2022-01");
        assert!(body["work"].get("id").is_none());
    }

    #[test]
    fn update_work_requires_identifier() {
        assert!(UpdateWorkPayload::new(work()).is_none());

        let mut item = work();
        item.backend_id = Some("abc".into());
        let body = serde_json::to_value(UpdateWorkPayload::new(item).unwrap()).unwrap();
        assert_eq!(body["work"]["id"], "abc");
        assert!(body["work"].get("_id").is_none());
    }

    #[test]
    fn education_uses_plural_key_and_upper_case_grade() {
        let item = EducationItem { college: Some("IIT Bombay".into()), cgpa: Some(8.5), ..Default::default() };
        let body = serde_json::to_value(CreateEducationPayload::new(item)).unwrap();

        assert_eq!(body["educations"]["CGPA"], 8.5);
        assert_eq!(body["educations"]["college"], "IIT Bombay");
        assert!(body["educations"].get("graduation_date").is_none());
    }

    #[test]
    fn backend_underscore_id_is_read() {
        let item: EducationItem = serde_json::from_value(json!({"_id": "e1", "degree": "BSc"})).unwrap();
        assert_eq!(item.server_id(), Some("e1"));
        assert!(item.is_enrolled());
    }
}
