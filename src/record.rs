use crate::value::FieldValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// One flat log record, built for a single emission and then dropped.
///
/// Serializes as a plain JSON object with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Seed the record with the reserved entry and then overlay `context`.
    ///
    /// Context is applied last: a context key equal to `reserved_key`
    /// replaces the per-call text.
    pub fn merge(
        reserved_key: &str,
        text: impl Into<String>,
        context: BTreeMap<String, FieldValue>,
    ) -> Self {
        let mut record = Record::default();
        record.insert(reserved_key, FieldValue::Str(text.into()));
        record.overlay(context);
        record
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn overlay(&mut self, context: BTreeMap<String, FieldValue>) {
        self.fields.extend(context);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
