//! Lookup lists behind the curriculum, grade, exam, skill, tag and concept
//! pickers.

use std::collections::HashSet;

use super::Services;
use crate::error::Result;
use crate::models::{Concept, Curriculum, Exam, Grade, Skill, Tag};
use crate::service::{Resource, ResourceService, Shared};
use crate::utils::{parse_id, query_string};

pub const CURRICULA_ENDPOINT: &str = "/curriculum";
pub const CURRICULA_KEY: &str = "curriculums";
pub const GRADES_ENDPOINT: &str = "/grade";
pub const GRADES_KEY: &str = "grades";
pub const EXAMS_ENDPOINT: &str = "/exam";
pub const EXAMS_KEY: &str = "exams";
pub const SKILLS_ENDPOINT: &str = "/skill";
pub const SKILLS_KEY: &str = "skills";
pub const TAGS_ENDPOINT: &str = "/tag";
pub const TAGS_KEY: &str = "tags";
pub const CONCEPTS_ENDPOINT: &str = "/concept";
pub const CONCEPTS_KEY: &str = "concepts";

async fn snapshot<T: Resource>(service: &ResourceService<T>, endpoint: &str, key: &str) -> Result<Vec<Shared<T>>> {
    let list = service.list(endpoint, key).await?;
    let items = list.read().clone();
    Ok(items)
}

pub async fn curricula(services: &Services) -> Result<Vec<Shared<Curriculum>>> {
    snapshot(&services.curricula, CURRICULA_ENDPOINT, CURRICULA_KEY).await
}

pub async fn grades(services: &Services) -> Result<Vec<Shared<Grade>>> {
    snapshot(&services.grades, GRADES_ENDPOINT, GRADES_KEY).await
}

pub async fn exams(services: &Services) -> Result<Vec<Shared<Exam>>> {
    snapshot(&services.exams, EXAMS_ENDPOINT, EXAMS_KEY).await
}

pub async fn skills(services: &Services) -> Result<Vec<Shared<Skill>>> {
    snapshot(&services.skills, SKILLS_ENDPOINT, SKILLS_KEY).await
}

pub async fn tags(services: &Services) -> Result<Vec<Shared<Tag>>> {
    snapshot(&services.tags, TAGS_ENDPOINT, TAGS_KEY).await
}

/// Concepts, optionally only those of one topic, minus the comma-separated
/// ids in `exclude`.
///
/// The list is always refetched since it depends on the topic.
pub async fn concepts(services: &Services, topic: Option<&str>, exclude: &str) -> Result<Vec<Shared<Concept>>> {
    let query = match topic {
        Some(raw) => {
            let topic_id: i16 = parse_id("topic", raw)?;
            query_string([("topic_id", topic_id.to_string())])
        }
        None => String::new(),
    };
    let endpoint = format!("{}{}", CONCEPTS_ENDPOINT, query);

    let list = services.concepts.refresh(&endpoint, CONCEPTS_KEY).await?;
    let mut rows = list.read().clone();

    let excluded: HashSet<i16> = exclude
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    if !excluded.is_empty() {
        rows.retain(|c| !excluded.contains(&c.read().id));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::error::ServiceError;
    use crate::remote::Method;
    use crate::remote::mock::MockGateway;
    use crate::resources::testing::services;

    #[tokio::test]
    async fn test_lookup_lists_are_cached() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(
            Method::Get,
            CURRICULA_ENDPOINT,
            json!([{"id": 1, "name": "CBSE", "code": "cbse"}, {"id": 2, "name": "ICSE"}]),
        );
        gateway.respond(Method::Get, GRADES_ENDPOINT, json!([{"id": 9, "number": 9}]));
        gateway.respond(Method::Get, EXAMS_ENDPOINT, json!([{"id": 2, "name": "JEE Main"}, {"id": 3, "name": null}]));
        gateway.respond(Method::Get, SKILLS_ENDPOINT, json!([{"id": 3, "name": "Recall"}]));
        gateway.respond(Method::Get, TAGS_ENDPOINT, json!([{"id": 100000, "name": "jee"}]));
        let services = services(&gateway);

        for _ in 0..2 {
            assert_eq!(curricula(&services).await.unwrap().len(), 2);
            assert_eq!(grades(&services).await.unwrap()[0].read().number, 9);
            let rows = exams(&services).await.unwrap();
            assert_eq!(rows[0].read().name, "JEE Main");
            assert_eq!(rows[1].read().name, "");
            assert_eq!(skills(&services).await.unwrap()[0].read().name, "Recall");
            assert_eq!(tags(&services).await.unwrap()[0].read().id, 100000);
        }
        assert_eq!(gateway.call_count(), 5);
    }

    #[tokio::test]
    async fn test_concepts_by_topic_with_exclusions() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(
            Method::Get,
            "/concept?topic_id=10",
            json!([
                {"id": 1, "topic_id": 10, "name": [{"lang_code": "en", "concept": "Inertia"}]},
                {"id": 2, "topic_id": 10},
                {"id": 3, "topic_id": 10},
            ]),
        );
        let services = services(&gateway);

        let rows = concepts(&services, Some("10"), "2,,x").await.unwrap();
        let ids: Vec<i16> = rows.iter().map(|c| c.read().id).collect();
        assert_eq!(ids, [1, 3]);
        assert_eq!(rows[0].read().name_by_lang("en"), "Inertia");
        assert_eq!(services.concepts.cached(CONCEPTS_KEY).unwrap().read().len(), 3);
    }

    #[tokio::test]
    async fn test_concepts_bad_topic() {
        let gateway = Arc::new(MockGateway::new());
        let services = services(&gateway);

        let err = concepts(&services, Some("x"), "").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidId { kind: "topic", .. }));
    }
}
