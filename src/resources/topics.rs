//! Topic flows.

use serde_json::json;

use super::Services;
use crate::error::{Result, ServiceError};
use crate::models::{NewTopic, Topic, TopicPatch};
use crate::remote::RequestBody;
use crate::service::{Resource, Shared};
use crate::utils::parse_id;

pub const TOPICS_ENDPOINT: &str = "/topic";
pub const TOPICS_KEY: &str = "topics";

/// `cms_status_id` of archived topics.
pub const STATUS_ARCHIVED_ID: i8 = 1;

pub async fn get_topic(services: &Services, id: &str) -> Result<Shared<Topic>> {
    let topic_id: i16 = parse_id(Topic::KIND, id)?;
    services
        .topics
        .get_by_id(topic_id, TOPICS_KEY, TOPICS_ENDPOINT)
        .await?
        .ok_or_else(|| ServiceError::NotFound {
            kind: Topic::KIND,
            id: id.to_string(),
        })
}

pub async fn add_topic(services: &Services, topic: &NewTopic) -> Result<Shared<Topic>> {
    services
        .topics
        .add_entity(RequestBody::json(topic)?, TOPICS_KEY, TOPICS_ENDPOINT)
        .await
}

pub async fn update_topic(services: &Services, id: &str, code: &str, name: &str) -> Result<Shared<Topic>> {
    let topic_id: i16 = parse_id(Topic::KIND, id)?;
    let body = RequestBody::json(&TopicPatch::new(code, name))?;
    services
        .topics
        .update_entity(id, TOPICS_ENDPOINT, body, TOPICS_KEY, move |t: &Topic| t.id == topic_id)
        .await
}

pub async fn archive_topic(services: &Services, id: &str) -> Result<()> {
    let topic_id: i16 = parse_id(Topic::KIND, id)?;
    let body = json!({ "cms_status_id": STATUS_ARCHIVED_ID });
    services
        .topics
        .archive_entity(topic_id, TOPICS_ENDPOINT, body.into(), TOPICS_KEY)
        .await
}
