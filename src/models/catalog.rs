//! Small lookup entities: curricula, grades, exams, skills, tags and
//! concepts.

use serde::{Deserialize, Serialize};

use super::common::{lang_text, name_by_lang, null_default};
use crate::service::Resource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    pub id: i16,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub code: String,
}

impl Resource for Curriculum {
    type Id = i16;
    const KIND: &'static str = "curriculum";

    fn id(&self) -> i16 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: i8,
    #[serde(default, deserialize_with = "null_default")]
    pub number: i8,
}

impl Resource for Grade {
    type Id = i8;
    const KIND: &'static str = "grade";

    fn id(&self) -> i8 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: i8,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
}

impl Resource for Exam {
    type Id = i8;
    const KIND: &'static str = "exam";

    fn id(&self) -> i8 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i16,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
}

impl Resource for Skill {
    type Id = i16;
    const KIND: &'static str = "skill";

    fn id(&self) -> i16 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
}

impl Resource for Tag {
    type Id = i32;
    const KIND: &'static str = "tag";

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub id: i16,
    #[serde(default, deserialize_with = "null_default")]
    pub name: Vec<ConceptLang>,
    #[serde(default, deserialize_with = "null_default")]
    pub topic_id: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptLang {
    pub lang_code: String,
    #[serde(rename = "concept")]
    pub concept_name: String,
}

lang_text!(ConceptLang, concept_name);

impl Concept {
    pub fn name_by_lang(&self, lang: &str) -> &str {
        name_by_lang(&self.name, lang)
    }
}

impl Resource for Concept {
    type Id = i16;
    const KIND: &'static str = "concept";

    fn id(&self) -> i16 {
        self.id
    }
}
