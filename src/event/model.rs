use crate::value::Value;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The kind of business event a workflow can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    OrderedProduct,
    OrderFulfilled,
    ReviewSubmitted,
    ReviewApproved,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::OrderedProduct => "ordered_product",
            EventType::OrderFulfilled => "order_fulfilled",
            EventType::ReviewSubmitted => "review_submitted",
            EventType::ReviewApproved => "review_approved",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An observed business event: what happened, plus its attributes
/// (e.g. `product_id`, `order_id`). Immutable once observed; supplied
/// externally per traversal invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    uuid: Uuid,
    event_type: EventType,
    #[serde(default)]
    attributes: AHashMap<String, Value>,
}

impl Event {
    pub fn new(event_type: EventType, attributes: AHashMap<String, Value>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            event_type,
            attributes,
        }
    }

    pub fn with_uuid(uuid: Uuid, event_type: EventType, attributes: AHashMap<String, Value>) -> Self {
        Self {
            uuid,
            event_type,
            attributes,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn attributes(&self) -> &AHashMap<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}
