use crate::value::FieldValue;
use std::collections::BTreeMap;

/// Persistent key/value context attached to one [`Logger`](crate::Logger).
///
/// Keys are unique; binding an existing key replaces its value. There is
/// no removal, the store lives exactly as long as its owning logger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextStore {
    fields: BTreeMap<String, FieldValue>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the value stored under `key`.
    pub fn bind(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Independent copy of every current entry.
    pub fn snapshot(&self) -> BTreeMap<String, FieldValue> {
        self.fields.clone()
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

impl<K, V> Extend<(K, V)> for ContextStore
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.bind(k, v);
        }
    }
}
