//! Entry tree builder for a single log call
//!
//! An [`EntryBuilder`] accumulates metrics and nested namespaces while a log
//! call's customization callback runs. Within one node, metric keys and
//! namespace names share a single key space. The whole tree shares one
//! write-once cause slot, so at most one cause can be attached per call no
//! matter which namespace it is attached through.

use super::cause::Cause;
use super::error::{EntryKind, LoggerError, Result};
use super::value::Value;
use std::cell::OnceCell;
use std::collections::{btree_map, BTreeMap};
use std::rc::Rc;

/// Immutable snapshot of a built entry: metric keys and namespace names
/// mapped to their values, namespaces appearing as nested maps
pub type ValueTree = BTreeMap<String, Value>;

/// Reserved metric key holding the log message text
pub const MESSAGE_KEY: &str = "message";

/// Reserved metric key holding the cause when it is folded into the message
pub const CAUSE_KEY: &str = "cause";

/// Builder for the structured content of one log entry
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::{EntryBuilder, Value};
///
/// let mut entry = EntryBuilder::new("Request processed");
/// entry.with("status", 200).unwrap();
/// entry.ns("http").unwrap().with("method", "GET").unwrap();
///
/// let tree = entry.snapshot().unwrap();
/// assert_eq!(tree["status"], Value::from(200));
/// assert_eq!(tree["http"].get("method"), Some(&Value::from("GET")));
/// ```
#[derive(Debug)]
pub struct EntryBuilder {
    metrics: BTreeMap<String, Value>,
    namespaces: BTreeMap<String, EntryBuilder>,
    cause: Rc<OnceCell<Cause>>,
}

impl EntryBuilder {
    /// Create the root node of a new entry, seeded with the message text
    pub fn new(message: impl Into<String>) -> Self {
        let mut metrics = BTreeMap::new();
        metrics.insert(MESSAGE_KEY.to_string(), Value::Text(message.into()));
        Self {
            metrics,
            namespaces: BTreeMap::new(),
            cause: Rc::new(OnceCell::new()),
        }
    }

    fn child(cause: Rc<OnceCell<Cause>>) -> Self {
        Self {
            metrics: BTreeMap::new(),
            namespaces: BTreeMap::new(),
            cause,
        }
    }

    /// Get the namespace registered under `name`, creating it on first use
    ///
    /// Repeated calls with the same name return the same node.
    pub fn ns(&mut self, name: impl Into<String>) -> Result<&mut EntryBuilder> {
        let name = require_non_blank(name.into(), "namespace")?;
        if self.metrics.contains_key(&name) {
            return Err(LoggerError::naming_conflict(name, EntryKind::Metric));
        }

        let cause = Rc::clone(&self.cause);
        Ok(self
            .namespaces
            .entry(name)
            .or_insert_with(|| EntryBuilder::child(cause)))
    }

    /// Attach a metric to this node
    ///
    /// A key can be used once per node. Null values are accepted and keep the
    /// key reserved, but are left out of the snapshot.
    pub fn with(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<&mut Self> {
        let key = require_non_blank(key.into(), "key")?;
        if self.namespaces.contains_key(&key) {
            return Err(LoggerError::naming_conflict(key, EntryKind::Namespace));
        }

        match self.metrics.entry(key) {
            btree_map::Entry::Occupied(existing) => Err(LoggerError::naming_conflict(
                existing.key().clone(),
                EntryKind::Metric,
            )),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                Ok(self)
            }
        }
    }

    /// Attach the cause of this entry
    ///
    /// Fails if any node of the tree already holds a cause.
    pub fn with_cause(&mut self, cause: impl Into<Cause>) -> Result<&mut Self> {
        match self.cause.get() {
            Some(first) => Err(LoggerError::cause_already_set(first.clone())),
            None => {
                self.cause.get_or_init(|| cause.into());
                Ok(self)
            }
        }
    }

    /// The cause attached anywhere in this tree
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.get()
    }

    /// Build the immutable value tree
    ///
    /// Null metrics and empty namespaces are left out. Returns `None` when
    /// nothing remains.
    pub fn snapshot(&self) -> Option<ValueTree> {
        let mut tree: ValueTree = self
            .metrics
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        for (name, namespace) in &self.namespaces {
            if let Some(nested) = namespace.snapshot() {
                tree.insert(name.clone(), Value::from(nested));
            }
        }

        if tree.is_empty() {
            None
        } else {
            Some(tree)
        }
    }
}

fn require_non_blank(text: String, name: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(LoggerError::invalid_argument(name, "must not be blank"));
    }
    Ok(text)
}
