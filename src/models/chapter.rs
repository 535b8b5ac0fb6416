//! Chapter model.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::common::{DEFAULT_LANG, lang_text, name_by_lang, null_default};
use super::Topic;
use crate::service::{Resource, Shared};
use crate::views::{ColumnOrd, Parent, compare_codes};

/// A chapter of one subject in one grade of a curriculum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chapter {
    pub id: i16,

    #[serde(default, deserialize_with = "null_default")]
    pub code: String,

    #[serde(default, deserialize_with = "null_default")]
    pub name: Vec<ChapterLang>,

    #[serde(default, deserialize_with = "null_default")]
    pub curriculum_id: i16,

    #[serde(default, deserialize_with = "null_default")]
    pub grade_id: i8,

    #[serde(default, deserialize_with = "null_default")]
    pub subject_id: i8,

    /// Topics of this chapter, rebuilt on every read from the cached topic
    /// list. These are handles into that list, not copies.
    #[serde(skip)]
    pub topics: Vec<Shared<Topic>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterLang {
    #[serde(rename = "chapter")]
    pub chapter_name: String,
    pub lang_code: String,
}

lang_text!(ChapterLang, chapter_name);

impl ChapterLang {
    pub fn english(name: impl Into<String>) -> Self {
        Self {
            chapter_name: name.into(),
            lang_code: DEFAULT_LANG.to_string(),
        }
    }
}

impl Chapter {
    pub fn name_by_lang(&self, lang: &str) -> &str {
        name_by_lang(&self.name, lang)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

impl Resource for Chapter {
    type Id = i16;
    const KIND: &'static str = "chapter";

    fn id(&self) -> i16 {
        self.id
    }
}

impl Parent<Topic> for Chapter {
    fn children_mut(&mut self) -> &mut Vec<Shared<Topic>> {
        &mut self.topics
    }
}

impl ColumnOrd for Chapter {
    fn compare_column(&self, other: &Self, column: &str) -> Ordering {
        match column {
            "1" => compare_codes(&self.code, &other.code),
            "2" => self
                .name_by_lang(DEFAULT_LANG)
                .cmp(other.name_by_lang(DEFAULT_LANG)),
            "3" => self.topic_count().cmp(&other.topic_count()),
            _ => Ordering::Equal,
        }
    }
}

/// Body for creating a chapter.
#[derive(Debug, Clone, Serialize)]
pub struct NewChapter {
    pub code: String,
    pub name: Vec<ChapterLang>,
    pub curriculum_id: i16,
    pub grade_id: i8,
    pub subject_id: i8,
}

impl NewChapter {
    pub fn new(code: &str, name: &str, curriculum_id: i16, grade_id: i8, subject_id: i8) -> Self {
        Self {
            code: code.to_string(),
            name: vec![ChapterLang::english(name)],
            curriculum_id,
            grade_id,
            subject_id,
        }
    }
}

/// Body for renaming or recoding a chapter.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterPatch {
    pub code: String,
    pub name: Vec<ChapterLang>,
}

impl ChapterPatch {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: vec![ChapterLang::english(name)],
        }
    }
}
