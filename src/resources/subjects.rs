use super::Services;
use crate::error::{Result, ServiceError};
use crate::models::Subject;
use crate::service::{Resource, Shared};
use crate::utils::parse_id;

pub const SUBJECTS_ENDPOINT: &str = "/subject";
pub const SUBJECTS_KEY: &str = "subjects";

/// The subject picked on a screen, from the cached subject list when one is
/// resident.
pub async fn fetch_selected_subject(services: &Services, id: &str) -> Result<Shared<Subject>> {
    let subject_id: i8 = parse_id(Subject::KIND, id)?;
    services
        .subjects
        .get_by_id(subject_id, SUBJECTS_KEY, SUBJECTS_ENDPOINT)
        .await?
        .ok_or_else(|| ServiceError::NotFound {
            kind: Subject::KIND,
            id: id.to_string(),
        })
}

pub async fn list_subjects(services: &Services) -> Result<Vec<Shared<Subject>>> {
    let list = services.subjects.list(SUBJECTS_ENDPOINT, SUBJECTS_KEY).await?;
    let subjects = list.read().clone();
    Ok(subjects)
}
