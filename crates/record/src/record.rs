use restorable_core::{Handle, Persistable, make_handle};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Errors from saving or parsing records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("record #{id} has an empty name")]
    EmptyName { id: u64 },
    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shared record of saves, standing in for durable storage.
///
/// Clones share the same entries, so a log attached to a record keeps
/// collecting saves from every copy the record is cloned into.
#[derive(Debug, Clone, Default)]
pub struct SaveLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl SaveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderings of every saved record, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn push(&self, entry: String) {
        self.entries.borrow_mut().push(entry);
    }
}

/// A numbered, named record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
    #[serde(skip)]
    log: Option<SaveLog>,
}

impl Record {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            log: None,
        }
    }

    /// Attach a log that receives an entry on every successful save.
    pub fn with_log(mut self, log: &SaveLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    /// Parse a record from JSON such as `{"id": 1, "name": "alpha"}`.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the record's id and name as JSON.
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }
}

// The save log is plumbing, not part of the record's value.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for Record {}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S[ #{} {} ]", self.id, self.name)
    }
}

impl Persistable for Record {
    type Error = RecordError;

    fn persist(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::EmptyName { id: self.id });
        }
        tracing::info!(id = self.id, name = %self.name, "saving record");
        if let Some(log) = &self.log {
            log.push(self.to_string());
        }
        Ok(())
    }

    fn render_text(&self) -> String {
        self.to_string()
    }
}

/// Build a record, save it into `log`, and hand it back behind an erased handle.
pub fn load_record(
    id: u64,
    name: impl Into<String>,
    log: &SaveLog,
) -> Result<Handle, RecordError> {
    make_handle(Record::new(id, name).with_log(log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use restorable_core::{RestorableValue, make_restorable, make_restorable_from};

    #[test]
    fn renders_like_the_sample_format() {
        assert_eq!(Record::new(1, "alpha").render_text(), "S[ #1 alpha ]");
    }

    #[test]
    fn equality_ignores_the_log() {
        let log = SaveLog::new();
        assert_eq!(Record::new(1, "a").with_log(&log), Record::new(1, "a"));
        assert_ne!(Record::new(1, "a"), Record::new(2, "a"));
    }

    #[test]
    fn blank_name_cannot_be_saved() {
        let err = Record::new(9, "  ").persist().unwrap_err();
        assert!(matches!(err, RecordError::EmptyName { id: 9 }));
    }

    #[test]
    fn rename_then_restore_reverts_rendering() {
        let mut r = make_restorable(Record::new(1, "alpha")).unwrap();
        r.value_mut().name = "alpha-2".to_string();
        assert!(r.is_changed());
        assert_eq!(r.render_text(), "S[ #1 alpha-2 ]");

        r.restore();
        assert!(!r.is_changed());
        assert_eq!(r.render_text(), Record::new(1, "alpha").render_text());
    }

    #[test]
    fn reused_source_binding_does_not_touch_earlier_wrapper() {
        let log = SaveLog::new();
        let mut s = Record::new(1, "alpha").with_log(&log);
        let r1 = make_restorable_from(&s).unwrap();

        s = Record::new(2, "beta").with_log(&log);
        let r2 = make_restorable_from(&s).unwrap();

        assert_eq!(r1.render_text(), "S[ #1 alpha ]");
        assert_eq!(r2.render_text(), "S[ #2 beta ]");
        assert_eq!(log.entries(), ["S[ #1 alpha ]", "S[ #2 beta ]"]);
    }

    #[test]
    fn persist_saves_working_copy_only() {
        let log = SaveLog::new();
        let mut r = make_restorable(Record::new(4, "delta").with_log(&log)).unwrap();
        r.value_mut().name = "delta (upd.)".to_string();
        r.persist().unwrap();

        assert_eq!(log.entries(), ["S[ #4 delta ]", "S[ #4 delta (upd.) ]"]);
        assert_eq!(r.original().name, "delta");
    }

    #[test]
    fn failed_save_propagates_through_wrapper_and_handle() {
        let mut r = RestorableValue::new(Record::new(5, "epsilon"));
        r.value_mut().name.clear();
        assert!(matches!(
            r.persist(),
            Err(RecordError::EmptyName { id: 5 })
        ));

        let handle: Handle = Box::new(r);
        let err = handle.persist().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::EmptyName { id: 5 })
        ));
    }

    #[test]
    fn load_record_returns_saved_handle() {
        let log = SaveLog::new();
        let handle = load_record(3, "gamma", &log).unwrap();
        assert_eq!(handle.render_text(), "S[ #3 gamma ]");
        assert_eq!(handle.to_string(), "S[ #3 gamma ]");
        assert_eq!(log.entries(), ["S[ #3 gamma ]"]);

        handle.persist().unwrap();
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn load_record_rejects_blank_name() {
        let log = SaveLog::new();
        assert!(load_record(3, "", &log).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn to_json_leaves_out_the_log() {
        let log = SaveLog::new();
        let json = Record::new(3, "gamma").with_log(&log).to_json().unwrap();
        assert_eq!(json, r#"{"id":3,"name":"gamma"}"#);
        assert_eq!(Record::from_json(&json).unwrap(), Record::new(3, "gamma"));
    }

    #[test]
    fn from_json_parses_record() {
        let record = Record::from_json(r#"{"id": 7, "name": "eta"}"#).unwrap();
        assert_eq!(record, Record::new(7, "eta"));
    }

    #[test]
    fn from_json_reports_bad_input() {
        let err = Record::from_json("{\"id\": \"seven\"}").unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
    }
}
