//! Test rules: the blueprint an exam imposes on one type of test.

use serde::{Deserialize, Serialize};

use super::common::null_default;
use crate::service::Resource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRule {
    pub exam_id: i8,

    /// Test subtype the rule applies to, e.g. `"chapter_test"`.
    #[serde(default, deserialize_with = "null_default")]
    pub test_type: String,

    #[serde(default, deserialize_with = "null_default")]
    pub config: RuleConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default, deserialize_with = "null_default")]
    pub subjects: Vec<SubjectRule>,
    /// Minutes.
    #[serde(default, deserialize_with = "null_default")]
    pub duration: i16,
    #[serde(default, deserialize_with = "null_default")]
    pub marking_scheme: MarkingScheme,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectRule {
    #[serde(default, deserialize_with = "null_default")]
    pub subject_ids: Vec<i8>,
    #[serde(default, deserialize_with = "null_default")]
    pub rules: RuleDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDetails {
    #[serde(default, deserialize_with = "null_default")]
    pub marks: i16,
    #[serde(default, deserialize_with = "null_default")]
    pub questions: i16,
    #[serde(default, deserialize_with = "null_default")]
    pub sections: Vec<RuleSection>,
    #[serde(default, deserialize_with = "null_default")]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSection {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default", rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_default")]
    pub count: i32,
}

/// Problem counts per difficulty level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    #[serde(default, deserialize_with = "null_default")]
    pub easy: i32,
    #[serde(default, deserialize_with = "null_default")]
    pub medium: i32,
    #[serde(default, deserialize_with = "null_default")]
    pub hard: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkingScheme {
    #[serde(default, deserialize_with = "null_default")]
    pub pos_marks: Vec<i32>,
    #[serde(default, deserialize_with = "null_default")]
    pub neg_marks: Vec<i32>,
}

impl TestRule {
    pub fn applies_to(&self, exam_id: i8, test_type: &str) -> bool {
        self.exam_id == exam_id && self.test_type == test_type
    }

    /// Questions a candidate answers across all subjects.
    pub fn question_count(&self) -> i32 {
        self.config
            .subjects
            .iter()
            .map(|s| i32::from(s.rules.questions))
            .sum()
    }
}

/// Rules have no key of their own; they are listed per exam and picked by
/// exam and test type together.
impl Resource for TestRule {
    type Id = i8;
    const KIND: &'static str = "test rule";

    fn id(&self) -> i8 {
        self.exam_id
    }
}
