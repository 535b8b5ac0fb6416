//! Topic model.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::common::{DEFAULT_LANG, lang_text, name_by_lang, null_default};
use super::Chapter;
use crate::service::Resource;
use crate::views::{Child, ColumnOrd, compare_codes};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i16,

    #[serde(default, deserialize_with = "null_default")]
    pub name: Vec<TopicLang>,

    #[serde(default, deserialize_with = "null_default")]
    pub code: String,

    #[serde(default, deserialize_with = "null_default")]
    pub chapter_id: i16,

    #[serde(default, deserialize_with = "null_default")]
    pub curriculum_id: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicLang {
    pub lang_code: String,
    #[serde(rename = "topic")]
    pub topic_name: String,
}

lang_text!(TopicLang, topic_name);

impl TopicLang {
    pub fn english(name: impl Into<String>) -> Self {
        Self {
            lang_code: DEFAULT_LANG.to_string(),
            topic_name: name.into(),
        }
    }
}

impl Topic {
    pub fn name_by_lang(&self, lang: &str) -> &str {
        name_by_lang(&self.name, lang)
    }
}

impl Resource for Topic {
    type Id = i16;
    const KIND: &'static str = "topic";

    fn id(&self) -> i16 {
        self.id
    }
}

impl Child<Chapter> for Topic {
    fn parent_id(&self) -> i16 {
        self.chapter_id
    }
}

impl ColumnOrd for Topic {
    fn compare_column(&self, other: &Self, column: &str) -> Ordering {
        match column {
            "1" => compare_codes(&self.code, &other.code),
            "2" => self
                .name_by_lang(DEFAULT_LANG)
                .cmp(other.name_by_lang(DEFAULT_LANG)),
            _ => Ordering::Equal,
        }
    }
}

/// Body for creating a topic.
#[derive(Debug, Clone, Serialize)]
pub struct NewTopic {
    pub code: String,
    pub name: Vec<TopicLang>,
    pub chapter_id: i16,
    pub curriculum_id: i16,
}

impl NewTopic {
    pub fn new(code: &str, name: &str, chapter_id: i16, curriculum_id: i16) -> Self {
        Self {
            code: code.to_string(),
            name: vec![TopicLang::english(name)],
            chapter_id,
            curriculum_id,
        }
    }
}

/// Body for renaming or recoding a topic.
#[derive(Debug, Clone, Serialize)]
pub struct TopicPatch {
    pub code: String,
    pub name: Vec<TopicLang>,
}

impl TopicPatch {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: vec![TopicLang::english(name)],
        }
    }
}
