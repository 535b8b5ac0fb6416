//! Test (exam paper) flows: the test table, test detail for the editor,
//! test writes and the rule an exam imposes on a test.

use std::collections::HashMap;

use serde_json::json;
use tracing::warn;

use super::Services;
use super::subjects::{SUBJECTS_ENDPOINT, SUBJECTS_KEY};
use crate::error::{Result, ServiceError};
use crate::models::{DEFAULT_LANG, STATUS_ARCHIVED, Test, TestRule};
use crate::remote::RequestBody;
use crate::service::{Resource, Shared};
use crate::utils::{parse_id, query_string};
use crate::views::{SortState, skip_archived, sort_by_state};

pub const TESTS_ENDPOINT: &str = "/resources/curriculum";
pub const TEST_ENDPOINT: &str = "/resource";
pub const TESTS_KEY: &str = "tests";
pub const TEST_RULES_ENDPOINT: &str = "/test-rule";
pub const TEST_RULES_KEY: &str = "testRules";

/// Curriculum, grade and test subtype a test table is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestScope {
    pub curriculum_id: i16,
    pub grade_id: i8,
    pub subtype: String,
}

impl TestScope {
    pub fn parse(curriculum: &str, grade: &str, subtype: &str) -> Result<Self> {
        Ok(Self {
            curriculum_id: parse_id("curriculum", curriculum)?,
            grade_id: parse_id("grade", grade)?,
            subtype: subtype.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            TESTS_ENDPOINT,
            query_string([
                ("curriculum_id", self.curriculum_id.to_string()),
                ("grade_id", self.grade_id.to_string()),
                ("type", "test".to_string()),
                ("subtype", self.subtype.clone()),
            ])
        )
    }
}

/// Rows of the test table: the scope's tests refetched, archived ones
/// dropped from the cached list, each stamped with the scope's
/// curriculum/grade pair and the cached list sorted by `sort`.
pub async fn tests_view(services: &Services, scope: &TestScope, sort: &SortState) -> Result<Vec<Shared<Test>>> {
    let list = services.tests.refresh(&scope.endpoint(), TESTS_KEY).await?;

    let mut rows = list.write();
    skip_archived(&mut rows);
    for test in rows.iter() {
        test.write()
            .set_curriculum_grade(scope.curriculum_id, scope.grade_id);
    }
    sort_by_state(&mut rows[..], sort);
    Ok(rows.to_vec())
}

pub async fn get_test(services: &Services, id: &str) -> Result<Shared<Test>> {
    let test_id: i32 = parse_id(Test::KIND, id)?;
    services
        .tests
        .get_by_id(test_id, TESTS_KEY, TEST_ENDPOINT)
        .await?
        .ok_or_else(|| ServiceError::NotFound {
            kind: Test::KIND,
            id: id.to_string(),
        })
}

/// A test as the editor shows it: every subject block named in English from
/// the cached subject list. The names are written onto the shared instance.
pub async fn get_test_detail(services: &Services, id: &str) -> Result<Shared<Test>> {
    let test = get_test(services, id).await?;
    let subjects = services.subjects.list(SUBJECTS_ENDPOINT, SUBJECTS_KEY).await?;

    let names: HashMap<i8, String> = subjects
        .read()
        .iter()
        .map(|subject| {
            let subject = subject.read();
            (subject.id, subject.name_by_lang(DEFAULT_LANG).to_string())
        })
        .collect();
    test.write().fill_subject_names(&names);
    Ok(test)
}

pub async fn create_test(services: &Services, test: &Test) -> Result<Shared<Test>> {
    services
        .tests
        .add_entity(RequestBody::json(test)?, TESTS_KEY, TEST_ENDPOINT)
        .await
}

pub async fn update_test(services: &Services, id: &str, test: &Test) -> Result<Shared<Test>> {
    let test_id: i32 = parse_id(Test::KIND, id)?;
    let body = RequestBody::json(test)?;
    services
        .tests
        .update_entity(id, TEST_ENDPOINT, body, TESTS_KEY, move |t: &Test| t.id == test_id)
        .await
}

pub async fn archive_test(services: &Services, id: &str) -> Result<()> {
    let test_id: i32 = parse_id(Test::KIND, id)?;
    let body = json!({ "cms_status": STATUS_ARCHIVED });
    services
        .tests
        .archive_entity(test_id, TEST_ENDPOINT, body.into(), TESTS_KEY)
        .await
}

/// The rule `exam_id` sets for tests of `test_type`, from the cached rule
/// list.
pub async fn test_rule(services: &Services, test_type: &str, exam_id: i8) -> Result<Shared<TestRule>> {
    let rules = services.test_rules.list(TEST_RULES_ENDPOINT, TEST_RULES_KEY).await?;
    let found = rules
        .read()
        .iter()
        .find(|rule| rule.read().applies_to(exam_id, test_type))
        .cloned();

    found.ok_or_else(|| ServiceError::NotFound {
        kind: TestRule::KIND,
        id: format!("{}/{}", exam_id, test_type),
    })
}

/// The rule of a test's first exam, if it has one.
///
/// A test without exams, or whose exam has no rule for its subtype, is
/// edited without a rule.
pub async fn rule_for_test(services: &Services, test: &Shared<Test>) -> Result<Option<Shared<TestRule>>> {
    let (exam_id, subtype) = {
        let test = test.read();
        match test.exam_ids.first() {
            Some(&exam_id) => (exam_id, test.subtype.clone()),
            None => return Ok(None),
        }
    };

    match test_rule(services, &subtype, exam_id).await {
        Ok(rule) => Ok(Some(rule)),
        Err(err @ ServiceError::NotFound { .. }) => {
            warn!("{}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
