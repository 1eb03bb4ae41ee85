//! Job posting records

use crate::loose::LooseList;
use crate::types::{ContentRecord, ContentType, RecordId};
use serde::{Deserialize, Serialize};

/// One open position
///
/// The three list fields routinely arrive loose (comma text or JSON text)
/// from the admin surface; [`LooseList`] absorbs all shapes at decode time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    /// Stable identity
    pub id: RecordId,
    /// Position title
    pub title: String,
    /// Owning department
    pub department: String,
    /// Location label ("Remote", "Berlin", ...)
    pub location: String,
    /// Employment kind; doubles as the category filter discriminant
    pub job_type: String,
    /// Long-form description
    pub description: String,
    /// Required skills
    pub skills: LooseList,
    /// Day-to-day responsibilities
    pub responsibilities: LooseList,
    /// Hard qualifications
    pub qualifications: LooseList,
    /// External application link
    pub apply_url: String,
}

impl ContentRecord for JobPosting {
    const KIND: ContentType = ContentType::Job;

    fn id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        if self.job_type.is_empty() {
            None
        } else {
            Some(&self.job_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comma_text_skills_normalize() {
        let job: JobPosting = serde_json::from_value(json!({
            "id": 7,
            "title": "Backend Engineer",
            "job_type": "full-time",
            "skills": "React, Node, SQL"
        }))
        .unwrap();

        assert_eq!(job.skills.as_slice(), ["React", "Node", "SQL"]);
        assert_eq!(job.category(), Some("full-time"));
    }

    #[test]
    fn json_text_skills_normalize() {
        let job: JobPosting = serde_json::from_value(json!({
            "id": 8,
            "title": "Frontend Engineer",
            "skills": r#"["React","Node"]"#
        }))
        .unwrap();

        assert_eq!(job.skills.as_slice(), ["React", "Node"]);
    }

    #[test]
    fn missing_fields_default() {
        let job: JobPosting = serde_json::from_value(json!({"id": 1})).unwrap();
        assert!(job.skills.is_empty());
        assert!(job.responsibilities.is_empty());
        assert!(job.qualifications.is_empty());
        assert_eq!(job.category(), None);
    }
}
