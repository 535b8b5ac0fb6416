//! Resource flows used by the CMS screens.
//!
//! Each submodule owns the endpoint and cache-key constants of one entity
//! collection and builds the views its screens need on top of
//! `ResourceService`. Identifier text is validated here, at the boundary.

use std::sync::Arc;

use crate::cache::ResourceCache;
use crate::models::{
    Chapter, Concept, Curriculum, Exam, Grade, Problem, Skill, Subject, Tag, Test, TestRule, Topic,
};
use crate::remote::Gateway;
use crate::service::ResourceService;

pub mod catalog;
pub mod chapters;
pub mod papers;
pub mod problems;
pub mod subjects;
pub mod topics;

/// One service per entity type, all sharing the process-wide cache and
/// gateway.
#[derive(Clone)]
pub struct Services {
    pub chapters: ResourceService<Chapter>,
    pub topics: ResourceService<Topic>,
    pub subjects: ResourceService<Subject>,
    pub tests: ResourceService<Test>,
    pub test_rules: ResourceService<TestRule>,
    pub problems: ResourceService<Problem>,
    pub curricula: ResourceService<Curriculum>,
    pub grades: ResourceService<Grade>,
    pub exams: ResourceService<Exam>,
    pub skills: ResourceService<Skill>,
    pub tags: ResourceService<Tag>,
    pub concepts: ResourceService<Concept>,
}

impl Services {
    pub fn new(cache: &ResourceCache, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            chapters: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            topics: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            subjects: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            tests: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            test_rules: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            problems: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            curricula: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            grades: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            exams: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            skills: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            tags: ResourceService::new(cache.clone(), Arc::clone(&gateway)),
            concepts: ResourceService::new(cache.clone(), gateway),
        }
    }
}
