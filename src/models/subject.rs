//! Subject model.

use serde::{Deserialize, Serialize};

use super::common::{lang_text, name_by_lang, null_default};
use crate::service::Resource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i8,

    #[serde(default, deserialize_with = "null_default")]
    pub name: Vec<SubjectLang>,

    #[serde(default, deserialize_with = "null_default")]
    pub code: String,

    /// 0 for top-level subjects.
    #[serde(default, deserialize_with = "null_default")]
    pub parent_id: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectLang {
    pub lang_code: String,
    #[serde(rename = "subject")]
    pub sub_name: String,
}

lang_text!(SubjectLang, sub_name);

impl Subject {
    pub fn name_by_lang(&self, lang: &str) -> &str {
        name_by_lang(&self.name, lang)
    }
}

impl Resource for Subject {
    type Id = i8;
    const KIND: &'static str = "subject";

    fn id(&self) -> i8 {
        self.id
    }
}
