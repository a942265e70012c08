use crate::condition::TriggerFilter;
use crate::error::EventDataError;
use crate::event::model::{Event, EventType};
use crate::value::Value;
use ahash::AHashMap;
use tracing::trace;

/// The normalized attribute bag handed to condition evaluation: the union of
/// the event's attributes and any filter-declared defaults, addressed by
/// filter key.
///
/// Only the [`EventDataProvider`] inserts entries, so every key present here
/// either came from the event or from an explicit default; the bag never
/// fabricates values. Transient; rebuilt per evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedEventData {
    entries: AHashMap<String, Value>,
}

impl PreparedEventData {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.entries.insert(key, value);
    }
}

/// Builds a [`PreparedEventData`] bag from an event and a trigger node's
/// declared filters.
///
/// Pure data transformation: no I/O, no side effects, memoizable per
/// (event, filter-set) pair within a single evaluation. Stateless, so one
/// instance can be shared across concurrent traversals.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventDataProvider;

impl EventDataProvider {
    pub fn new() -> Self {
        Self
    }

    /// Prepares the data bag for a materialized event.
    ///
    /// For each filter key the corresponding event attribute is copied in;
    /// an absent attribute falls back to the filter's declared default, or
    /// is left out of the bag entirely. Whether an absent key is an
    /// acceptable "optional match" is the condition processor's decision,
    /// not made here.
    pub fn get_trigger_event_data<'a, I>(&self, event: &Event, filters: I) -> PreparedEventData
    where
        I: IntoIterator<Item = &'a TriggerFilter>,
    {
        let mut prepared = PreparedEventData::default();
        for filter in filters {
            let key = filter.key();
            if let Some(value) = event.attribute(key) {
                prepared.insert(key.to_string(), value.clone());
            } else if let Some(default) = &filter.default {
                prepared.insert(key.to_string(), default.clone());
            }
        }
        trace!(event = %event.uuid(), keys = prepared.len(), "prepared trigger event data");
        prepared
    }

    /// Prepares the data bag from an event type and a raw attribute shape,
    /// without a persisted event. Used for dry runs of authored triggers.
    ///
    /// Unlike the materialized-event path, a filter key missing from the
    /// supplied shape with no declared default is an error here: there is no
    /// later point at which the attribute could still arrive.
    pub fn get_dry_run_event_data<'a, I>(
        &self,
        event_type: EventType,
        attributes: &AHashMap<String, Value>,
        filters: I,
    ) -> Result<PreparedEventData, EventDataError>
    where
        I: IntoIterator<Item = &'a TriggerFilter>,
    {
        let mut prepared = PreparedEventData::default();
        for filter in filters {
            let key = filter.key();
            if let Some(value) = attributes.get(key) {
                prepared.insert(key.to_string(), value.clone());
            } else if let Some(default) = &filter.default {
                prepared.insert(key.to_string(), default.clone());
            } else {
                return Err(EventDataError::EventDataUnavailable {
                    key: key.to_string(),
                    event_type: event_type.to_string(),
                });
            }
        }
        Ok(prepared)
    }
}
