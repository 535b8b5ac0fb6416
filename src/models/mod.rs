//! Entity models, with the JSON field names the datastore uses.

pub(crate) mod common;

pub mod catalog;
pub mod chapter;
pub mod problem;
pub mod subject;
pub mod test_rule;
pub mod topic;

pub use self::catalog::{Concept, Curriculum, Exam, Grade, Skill, Tag};
pub use self::chapter::{Chapter, ChapterLang, ChapterPatch, NewChapter};
pub use self::common::{DEFAULT_LANG, LangText};
pub use self::problem::{Problem, ProblemContent, Solution};
pub use self::subject::{Subject, SubjectLang};
pub use self::test::{CurriculumGrade, STATUS_ARCHIVED, Test, TestParams, TestSubject};
pub use self::test_rule::{Difficulty, MarkingScheme, RuleConfig, RuleDetails, RuleSection, SubjectRule, TestRule};
pub use self::topic::{NewTopic, Topic, TopicLang, TopicPatch};
