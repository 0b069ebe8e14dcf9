//! Wire DTOs for the directory service.

use serde::Deserialize;
use skillq_core::programmer::{Programmer, ProgrammerId};

/// A programmer record as the service sends it.
///
/// The service has emitted the identifier as `id`, `uuid`, or both, and the
/// portrait as `imageUrl` or `image`; all are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammerDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default, alias = "image")]
    pub image_url: String,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl ProgrammerDto {
    fn identifier(&self) -> Option<&str> {
        [self.id.as_deref(), self.uuid.as_deref()]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
    }

    /// Converts to the domain model; `None` when the record carries no identifier.
    pub fn into_domain(self) -> Option<Programmer> {
        let id = ProgrammerId::new(self.identifier()?);
        Some(Programmer {
            id,
            name: self.name,
            email: self.email,
            job_title: self.job_title,
            image_url: self.image_url,
            skills: self.skills.unwrap_or_default(),
        })
    }
}

/// Decodes a list body. `null` is an empty list; records without an
/// identifier are dropped with a warning.
pub fn decode_programmer_list(body: &str) -> serde_json::Result<Vec<Programmer>> {
    let records: Option<Vec<ProgrammerDto>> = serde_json::from_str(body)?;
    let records = records.unwrap_or_default();
    let total = records.len();

    let programmers: Vec<Programmer> = records
        .into_iter()
        .filter_map(ProgrammerDto::into_domain)
        .collect();

    if programmers.len() != total {
        tracing::warn!(
            dropped = total - programmers.len(),
            "Dropped programmer records without an identifier"
        );
    }

    Ok(programmers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_uses_id_then_uuid() {
        let body = r#"[
            {"id": "id-1", "uuid": "u-1", "name": "Ada", "email": "a@x.com",
             "jobTitle": "Engineer", "imageUrl": "http://img/1.png", "skills": ["Rust", "Go"]},
            {"id": "", "uuid": "u-2", "name": "Grace", "email": "g@x.com",
             "jobTitle": "Admiral", "image": "http://img/2.png"}
        ]"#;

        let programmers = decode_programmer_list(body).unwrap();
        assert_eq!(programmers.len(), 2);
        assert_eq!(programmers[0].id.as_str(), "id-1");
        assert_eq!(programmers[0].skills, vec!["Rust", "Go"]);
        assert_eq!(programmers[1].id.as_str(), "u-2");
        assert_eq!(programmers[1].image_url, "http://img/2.png");
        assert!(programmers[1].skills.is_empty());
    }

    #[test]
    fn test_decode_null_is_empty() {
        assert!(decode_programmer_list("null").unwrap().is_empty());
        assert!(decode_programmer_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_records_without_identifier_are_dropped() {
        let body = r#"[{"name": "Nobody"}, {"uuid": "u-9", "name": "Somebody"}]"#;
        let programmers = decode_programmer_list(body).unwrap();
        assert_eq!(programmers.len(), 1);
        assert_eq!(programmers[0].name, "Somebody");
    }

    #[test]
    fn test_skill_order_and_duplicates_kept() {
        let body = r#"[{"id": "p", "skills": ["Rust", "Go", "Rust"]}]"#;
        let programmers = decode_programmer_list(body).unwrap();
        assert_eq!(programmers[0].skills, vec!["Rust", "Go", "Rust"]);
    }

    #[test]
    fn test_non_list_body_is_error() {
        assert!(decode_programmer_list(r#"{"error": "boom"}"#).is_err());
    }
}
