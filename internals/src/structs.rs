use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::context::RelayContext;
use crate::failure::Failure;

/// A dynamically typed body, header or property value.
#[derive(Clone, PartialEq, Default, Debug)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
    Bytes(Arc<Vec<u8>>),
    Timestamp(DateTime<Utc>),
    Failure(Failure),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name shown by formatters.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "i64",
            Value::Double(_) => "f64",
            Value::Text(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Timestamp(_) => "DateTime<Utc>",
            Value::Failure(f) => f.type_name(),
        }
    }
}

/// Message headers with case-insensitive keys.
///
/// The first spelling of a key is kept for display; iteration is ordered by
/// the case-folded key.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Headers {
    entries: BTreeMap<String, (String, Value)>,
}

fn fold(key: &str) -> String {
    key.to_lowercase()
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.entry(fold(&key)) {
            Entry::Occupied(o) => Some(std::mem::replace(&mut o.into_mut().1, value)),
            Entry::Vacant(v) => {
                v.insert((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&fold(key)).map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(&fold(key)).map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_str(), value))
    }
}

#[derive(Clone, PartialEq, Default, Debug)]
pub struct Message {
    pub body: Value,
    pub headers: Headers,
}

/// The unit of work flowing through a pipeline.
///
/// The creation time is fixed when the exchange is built and kept at
/// millisecond precision.
#[derive(Clone)]
pub struct Exchange {
    id: Uuid,
    message: Message,
    properties: HashMap<String, Value>,
    exception: Option<Failure>,
    created: DateTime<Utc>,
    context: Arc<RelayContext>,
}

impl Exchange {
    pub fn new(context: Arc<RelayContext>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: Message::default(),
            properties: HashMap::new(),
            exception: None,
            created: Utc::now().trunc_subsecs(3),
            context,
        }
    }

    pub fn with_body(mut self, body: impl Into<Value>) -> Self {
        self.message.body = body.into();
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.message.headers.insert(key, value);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_exception(mut self, failure: Failure) -> Self {
        self.exception = Some(failure);
        self
    }

    /// Overrides the creation time, e.g. when rebuilding an exchange from a journal.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created.trunc_subsecs(3);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &RelayContext {
        &self.context
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }

    pub fn header(&self, key: &str) -> Option<&Value> {
        self.message.headers.get(key)
    }

    pub fn properties(&self) -> &HashMap<String, Value> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    pub fn exception(&self) -> Option<&Failure> {
        self.exception.as_ref()
    }

    pub fn set_exception(&mut self, failure: Option<Failure>) {
        self.exception = failure;
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn created_millis(&self) -> i64 {
        self.created.timestamp_millis()
    }
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("properties", &self.properties)
            .field("exception", &self.exception)
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}
