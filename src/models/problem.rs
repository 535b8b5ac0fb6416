//! Problem model.

use serde::{Deserialize, Serialize};

use super::common::null_default;
use super::{STATUS_ARCHIVED, Subject};
use crate::service::Resource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default, deserialize_with = "null_default", skip_serializing_if = "is_zero")]
    pub id: i32,

    #[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub code: String,

    #[serde(default, deserialize_with = "null_default", rename = "type")]
    pub kind: String,

    #[serde(default, deserialize_with = "null_default")]
    pub subtype: String,

    #[serde(default, deserialize_with = "null_default")]
    pub meta_data: ProblemContent,

    #[serde(default, deserialize_with = "null_default")]
    pub skill_ids: Vec<i16>,

    #[serde(default, deserialize_with = "null_default")]
    pub subject_id: i8,

    #[serde(default, deserialize_with = "null_default")]
    pub topic_id: i16,

    #[serde(default, deserialize_with = "null_default")]
    pub chapter_id: i16,

    #[serde(default, deserialize_with = "null_default")]
    pub difficulty_level: String,

    #[serde(default, deserialize_with = "null_default")]
    pub tag_ids: Vec<i32>,

    #[serde(default, deserialize_with = "null_default", rename = "cms_status")]
    pub status: String,

    /// Subject attached for display; not part of the stored record.
    #[serde(skip)]
    pub subject: Option<Subject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemContent {
    /// Question HTML.
    #[serde(default, deserialize_with = "null_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_default")]
    pub options: Vec<String>,
    #[serde(default, deserialize_with = "null_default", rename = "answer")]
    pub answers: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub solutions: Vec<Solution>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

fn is_zero(id: &i32) -> bool {
    *id == 0
}

impl Problem {
    /// Difficulty as 1 (easy or unknown) to 3 (hard).
    pub fn display_difficulty(&self) -> u8 {
        match self.difficulty_level.as_str() {
            "hard" => 3,
            "medium" => 2,
            _ => 1,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.status == STATUS_ARCHIVED
    }
}

impl Resource for Problem {
    type Id = i32;
    const KIND: &'static str = "problem";

    fn id(&self) -> i32 {
        self.id
    }
}
