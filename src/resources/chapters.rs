//! Chapter flows: the chapter table, chapter detail and its topic table.

use std::slice;

use super::Services;
use super::topics::{TOPICS_ENDPOINT, TOPICS_KEY};
use crate::error::{Result, ServiceError};
use crate::models::{Chapter, ChapterPatch, NewChapter, Topic};
use crate::remote::RequestBody;
use crate::service::{Resource, Shared};
use crate::utils::{parse_id, query_string};
use crate::views::{SortState, associate, sort_by_state};

pub const CHAPTERS_ENDPOINT: &str = "/chapter";
pub const CHAPTERS_KEY: &str = "chapters";

/// Curriculum, grade and subject a chapter table is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterScope {
    pub curriculum_id: i16,
    pub grade_id: i8,
    pub subject_id: i8,
}

impl ChapterScope {
    pub fn parse(curriculum: &str, grade: &str, subject: &str) -> Result<Self> {
        Ok(Self {
            curriculum_id: parse_id("curriculum", curriculum)?,
            grade_id: parse_id("grade", grade)?,
            subject_id: parse_id("subject", subject)?,
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            CHAPTERS_ENDPOINT,
            query_string([
                ("curriculum_id", self.curriculum_id.to_string()),
                ("grade_id", self.grade_id.to_string()),
                ("subject_id", self.subject_id.to_string()),
            ])
        )
    }

    fn contains(&self, chapter: &Chapter) -> bool {
        chapter.curriculum_id == self.curriculum_id
            && chapter.grade_id == self.grade_id
            && chapter.subject_id == self.subject_id
    }
}

/// Rows of the chapter table.
///
/// Always refetches the scope's chapters, stamps the curriculum on each
/// (the datastore omits it), compacts the cached list down to the chapters
/// in scope, attaches their topics from the cached topic list and sorts the
/// cached list by `sort`.
pub async fn chapters_view(
    services: &Services,
    scope: ChapterScope,
    sort: &SortState,
) -> Result<Vec<Shared<Chapter>>> {
    let endpoint = scope.endpoint();
    let (chapters, topics) = futures::try_join!(
        services.chapters.refresh(&endpoint, CHAPTERS_KEY),
        services.topics.list(TOPICS_ENDPOINT, TOPICS_KEY),
    )?;
    let topics = topics.read().clone();

    let mut rows = chapters.write();
    for chapter in rows.iter() {
        chapter.write().curriculum_id = scope.curriculum_id;
    }
    rows.retain(|c| scope.contains(&c.read()));
    associate(&rows[..], &topics);
    sort_by_state(&mut rows[..], sort);
    Ok(rows.to_vec())
}

pub async fn get_chapter(services: &Services, id: &str) -> Result<Shared<Chapter>> {
    let chapter_id: i16 = parse_id(Chapter::KIND, id)?;
    services
        .chapters
        .get_by_id(chapter_id, CHAPTERS_KEY, CHAPTERS_ENDPOINT)
        .await?
        .ok_or_else(|| ServiceError::NotFound {
            kind: Chapter::KIND,
            id: id.to_string(),
        })
}

/// Rows of a chapter's topic table.
///
/// Topics are attached from the cached topic list when the chapter has none
/// yet (e.g. it was fetched on its own), then sorted by `sort`.
pub async fn chapter_topics(services: &Services, id: &str, sort: &SortState) -> Result<Vec<Shared<Topic>>> {
    let chapter = get_chapter(services, id).await?;

    if chapter.read().topics.is_empty() {
        let topics = services.topics.list(TOPICS_ENDPOINT, TOPICS_KEY).await?;
        let topics = topics.read().clone();
        associate(slice::from_ref(&chapter), &topics);
    }

    let mut rows = chapter.read().topics.clone();
    sort_by_state(&mut rows, sort);
    Ok(rows)
}

pub async fn add_chapter(services: &Services, chapter: &NewChapter) -> Result<Shared<Chapter>> {
    services
        .chapters
        .add_entity(RequestBody::json(chapter)?, CHAPTERS_KEY, CHAPTERS_ENDPOINT)
        .await
}

pub async fn update_chapter(
    services: &Services,
    id: &str,
    code: &str,
    name: &str,
) -> Result<Shared<Chapter>> {
    let chapter_id: i16 = parse_id(Chapter::KIND, id)?;
    let body = RequestBody::json(&ChapterPatch::new(code, name))?;
    services
        .chapters
        .update_entity(id, CHAPTERS_ENDPOINT, body, CHAPTERS_KEY, move |c: &Chapter| {
            c.id == chapter_id
        })
        .await
}

pub async fn delete_chapter(services: &Services, id: &str) -> Result<()> {
    let chapter_id: i16 = parse_id(Chapter::KIND, id)?;
    services
        .chapters
        .delete_entity(chapter_id, CHAPTERS_KEY, CHAPTERS_ENDPOINT)
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::remote::Method;
    use crate::remote::mock::MockGateway;
    use crate::resources::testing::services;
    use crate::service::FetchPolicy;
    use crate::views::SortOrder;

    const SCOPED: &str = "/chapter?curriculum_id=1&grade_id=2&subject_id=3";

    fn ten_chapters() -> serde_json::Value {
        let chapters: Vec<_> = (1..=10)
            .map(|id| {
                json!({
                    "id": id,
                    "code": format!("CH-{}", 11 - id),
                    "name": [{"chapter": format!("Chapter {}", id), "lang_code": "en"}],
                    "grade_id": 2,
                    "subject_id": 3
                })
            })
            .collect();
        json!(chapters)
    }

    fn topics() -> serde_json::Value {
        json!([
            {"id": 100, "code": "T-2", "chapter_id": 4},
            {"id": 101, "code": "T-1", "chapter_id": 4},
            {"id": 102, "code": "T-1", "chapter_id": 5},
            {"id": 103, "code": "T-9", "chapter_id": 77},
        ])
    }

    fn routed() -> Arc<MockGateway> {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(Method::Get, SCOPED, ten_chapters());
        gateway.respond(Method::Get, TOPICS_ENDPOINT, topics());
        gateway
    }

    fn scope() -> ChapterScope {
        ChapterScope::parse("1", "2", "3").unwrap()
    }

    #[test]
    fn test_scope_endpoint() {
        assert_eq!(scope().endpoint(), SCOPED);
        assert!(ChapterScope::parse("1", "200", "3").is_err());
    }

    #[tokio::test]
    async fn test_view_then_cache_only_then_update() {
        let gateway = routed();
        gateway.respond(
            Method::Patch,
            "/chapter/4",
            json!({"id": 4, "code": "CH-7", "name": [{"chapter": "X", "lang_code": "en"}], "grade_id": 2, "subject_id": 3}),
        );
        let services = services(&gateway);

        let rows = chapters_view(&services, scope(), &SortState::default()).await.unwrap();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|c| c.read().curriculum_id == 1));

        let calls_before = gateway.call_count();
        let cached = services
            .chapters
            .list_entities(SCOPED, CHAPTERS_KEY, FetchPolicy::CacheOnly)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cached.read().len(), 10);
        assert_eq!(gateway.call_count(), calls_before);

        let updated = update_chapter(&services, "4", "CH-7", "X").await.unwrap();
        assert_eq!(updated.read().id, 4);
        assert_eq!(updated.read().name_by_lang("en"), "X");

        let in_cache = cached.read().iter().find(|c| c.read().id == 4).cloned().unwrap();
        assert_eq!(in_cache.read().name_by_lang("en"), "X");
        let in_view = rows.iter().find(|c| c.read().id == 4).unwrap();
        assert_eq!(in_view.read().name_by_lang("en"), "X");
    }

    #[tokio::test]
    async fn test_view_attaches_topics_and_sorts() {
        let gateway = routed();
        let services = services(&gateway);

        let sort = SortState::new("1", SortOrder::Asc);
        let rows = chapters_view(&services, scope(), &sort).await.unwrap();

        let ids: Vec<i16> = rows.iter().map(|c| c.read().id).collect();
        assert_eq!(ids, [10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);

        let chapter_4 = rows.iter().find(|c| c.read().id == 4).unwrap();
        assert_eq!(chapter_4.read().topic_count(), 2);

        // A second view run rebuilds topics without duplicating them.
        let rows = chapters_view(&services, scope(), &sort).await.unwrap();
        let chapter_4 = rows.iter().find(|c| c.read().id == 4).unwrap();
        assert_eq!(chapter_4.read().topic_count(), 2);
    }

    #[tokio::test]
    async fn test_view_sorts_by_topic_count_desc() {
        let gateway = routed();
        let services = services(&gateway);

        let rows = chapters_view(&services, scope(), &SortState::new("3", SortOrder::Desc))
            .await
            .unwrap();

        let ids: Vec<i16> = rows.iter().take(3).map(|c| c.read().id).collect();
        assert_eq!(ids, [4, 5, 1]);
    }

    #[tokio::test]
    async fn test_view_compacts_cached_list_to_scope() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(
            Method::Get,
            SCOPED,
            json!([
                {"id": 1, "code": "CH-1", "grade_id": 2, "subject_id": 3},
                {"id": 2, "code": "CH-2", "grade_id": 5, "subject_id": 3},
                {"id": 3, "code": "CH-3", "grade_id": 2, "subject_id": 3},
            ]),
        );
        gateway.respond(Method::Get, TOPICS_ENDPOINT, topics());
        let services = services(&gateway);

        let rows = chapters_view(&services, scope(), &SortState::default()).await.unwrap();
        assert_eq!(rows.len(), 2);

        let cached = services.chapters.cached(CHAPTERS_KEY).unwrap();
        let ids: Vec<i16> = cached.read().iter().map(|c| c.read().id).collect();
        assert_eq!(ids, [1, 3]);
        assert!(cached.read().capacity() >= 3);
    }

    #[tokio::test]
    async fn test_view_tolerates_null_fields() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(
            Method::Get,
            SCOPED,
            json!([
                {"id": 1, "code": null, "name": null, "grade_id": 2, "subject_id": 3},
                {"id": 2, "code": "CH-2", "grade_id": 2, "subject_id": 3},
            ]),
        );
        gateway.respond(Method::Get, TOPICS_ENDPOINT, topics());
        let services = services(&gateway);

        let rows = chapters_view(&services, scope(), &SortState::new("1", SortOrder::Asc))
            .await
            .unwrap();

        let codes: Vec<String> = rows.iter().map(|c| c.read().code.clone()).collect();
        assert_eq!(codes, ["", "CH-2"]);
        assert_eq!(rows[0].read().name_by_lang("en"), "");
    }

    #[tokio::test]
    async fn test_view_fails_when_topics_fail() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(Method::Get, SCOPED, ten_chapters());
        gateway.fail(Method::Get, TOPICS_ENDPOINT, 503);
        let services = services(&gateway);

        let err = chapters_view(&services, scope(), &SortState::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Status(503)));
    }

    #[tokio::test]
    async fn test_chapter_topics_for_uncached_chapter() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(Method::Get, "/chapter/4", json!({"id": 4, "code": "CH-4"}));
        gateway.respond(Method::Get, TOPICS_ENDPOINT, topics());
        let services = services(&gateway);

        let rows = chapter_topics(&services, "4", &SortState::new("1", SortOrder::Asc))
            .await
            .unwrap();

        let ids: Vec<i16> = rows.iter().map(|t| t.read().id).collect();
        assert_eq!(ids, [101, 100]);
        assert!(services.chapters.cached(CHAPTERS_KEY).is_none());
    }

    #[tokio::test]
    async fn test_add_and_delete() {
        let gateway = routed();
        gateway.respond(
            Method::Post,
            CHAPTERS_ENDPOINT,
            json!({"id": 11, "code": "CH-11", "grade_id": 2, "subject_id": 3}),
        );
        gateway.respond(Method::Delete, "/chapter/2", json!(null));
        let services = services(&gateway);
        chapters_view(&services, scope(), &SortState::default()).await.unwrap();

        let new = NewChapter::new("CH-11", "Waves", 1, 2, 3);
        add_chapter(&services, &new).await.unwrap();
        let cached = services.chapters.cached(CHAPTERS_KEY).unwrap();
        assert_eq!(cached.read().len(), 11);
        assert_eq!(cached.read()[10].read().id, 11);

        delete_chapter(&services, "2").await.unwrap();
        let ids: Vec<i16> = cached.read().iter().map(|c| c.read().id).collect();
        assert_eq!(ids, [1, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }
}
