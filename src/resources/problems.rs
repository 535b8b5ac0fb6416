//! Problem flows: the topic problem table, the problem picker of the test
//! editor and problem detail.

use std::collections::HashMap;

use super::Services;
use super::papers::TEST_ENDPOINT;
use super::subjects::{SUBJECTS_ENDPOINT, SUBJECTS_KEY, fetch_selected_subject};
use crate::error::{Result, ServiceError};
use crate::models::{DEFAULT_LANG, Problem, Subject, Test};
use crate::remote::RequestBody;
use crate::service::{Resource, Shared};
use crate::utils::{parse_id, query_string};
use crate::views::ProblemFilter;

pub const PROBLEMS_ENDPOINT: &str = "/problems";
pub const PROBLEMS_KEY: &str = "problems";

/// Problems of a topic within a curriculum, each carrying the selected
/// subject. `filter` compacts the cached list itself.
pub async fn problems_view(
    services: &Services,
    curriculum: &str,
    topic: &str,
    subject: &str,
    filter: &ProblemFilter,
) -> Result<Vec<Shared<Problem>>> {
    let curriculum_id: i16 = parse_id("curriculum", curriculum)?;
    let topic_id: i16 = parse_id("topic", topic)?;
    let endpoint = format!(
        "{}{}",
        PROBLEMS_ENDPOINT,
        query_string([
            ("curriculum_id", curriculum_id.to_string()),
            ("topic_id", topic_id.to_string()),
            ("lang_code", DEFAULT_LANG.to_string()),
        ])
    );

    let (problems, subject) = futures::try_join!(
        services.problems.refresh(&endpoint, PROBLEMS_KEY),
        fetch_selected_subject(services, subject),
    )?;
    let subject = subject.read().clone();

    let mut rows = problems.write();
    for problem in rows.iter() {
        problem.write().subject = Some(subject.clone());
    }
    filter.apply(&mut rows);
    Ok(rows.to_vec())
}

/// Problems placed in a test, refetched for the given curriculum.
///
/// Archived problems are dropped from the cached list and each remaining one
/// gets its subject from the cached subject list. With `subject` set, only
/// that subject's problems are kept.
pub async fn test_problems(
    services: &Services,
    test: &str,
    curriculum: &str,
    subject: Option<&str>,
) -> Result<Vec<Shared<Problem>>> {
    let test_id: i32 = parse_id(Test::KIND, test)?;
    let curriculum_id: i16 = parse_id("curriculum", curriculum)?;
    let subject_id: Option<i8> = subject
        .map(|raw| parse_id(Subject::KIND, raw))
        .transpose()?;
    let endpoint = format!(
        "{}/test/{}/problems{}",
        TEST_ENDPOINT,
        test_id,
        query_string([
            ("lang_code", DEFAULT_LANG.to_string()),
            ("curriculum_id", curriculum_id.to_string()),
        ])
    );

    let (problems, subjects) = futures::try_join!(
        services.problems.refresh(&endpoint, PROBLEMS_KEY),
        services.subjects.list(SUBJECTS_ENDPOINT, SUBJECTS_KEY),
    )?;
    let by_id: HashMap<i8, Subject> = subjects
        .read()
        .iter()
        .map(|subject| {
            let subject = subject.read();
            (subject.id, subject.clone())
        })
        .collect();

    let mut rows = problems.write();
    rows.retain(|p| !p.read().is_archived());
    for problem in rows.iter() {
        let mut problem = problem.write();
        let subject = by_id.get(&problem.subject_id).cloned();
        problem.subject = subject;
    }
    if let Some(subject_id) = subject_id {
        rows.retain(|p| p.read().subject_id == subject_id);
    }
    Ok(rows.to_vec())
}

/// One problem, from the resident problem list or else fetched in the
/// curriculum's English rendering.
pub async fn get_problem(services: &Services, id: &str, curriculum: &str) -> Result<Shared<Problem>> {
    let problem_id: i32 = parse_id(Problem::KIND, id)?;
    let curriculum_id: i16 = parse_id("curriculum", curriculum)?;
    let endpoint = format!(
        "{}/problem/{}/{}/{}",
        TEST_ENDPOINT, problem_id, DEFAULT_LANG, curriculum_id
    );

    // The id is already a path segment of the endpoint.
    services
        .problems
        .get_entity("", move |p: &Problem| p.id == problem_id, PROBLEMS_KEY, &endpoint)
        .await?
        .ok_or_else(|| ServiceError::NotFound {
            kind: Problem::KIND,
            id: id.to_string(),
        })
}

pub async fn add_problem(services: &Services, problem: &Problem) -> Result<Shared<Problem>> {
    services
        .problems
        .add_entity(RequestBody::json(problem)?, PROBLEMS_KEY, TEST_ENDPOINT)
        .await
}
