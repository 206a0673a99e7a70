//! Environment variables read by [`Logger::bind_env`](crate::Logger::bind_env)
//! and the field names they are written under.
//!
//! Extraction goes through a caller-supplied lookup function;
//! [`EnvMapping::extract`] uses the process environment.

use crate::value::FieldValue;

/// Name of the running Lambda function.
pub const FUNCTION_NAME_ENV: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// Version of the running Lambda function.
pub const FUNCTION_VERSION_ENV: &str = "AWS_LAMBDA_FUNCTION_VERSION";

/// Mapping from environment variable name to output field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvMapping {
    entries: Vec<(String, String)>,
}

impl Default for EnvMapping {
    fn default() -> Self {
        Self::empty()
            .with(FUNCTION_NAME_ENV, "functionName")
            .with(FUNCTION_VERSION_ENV, "functionVersion")
    }
}

impl EnvMapping {
    pub fn empty() -> Self {
        EnvMapping { entries: Vec::new() }
    }

    /// Add (or re-target) the field that `var` is written under.
    pub fn with(mut self, var: impl Into<String>, field: impl Into<String>) -> Self {
        let var = var.into();
        let field = field.into();
        match self.entries.iter_mut().find(|(v, _)| *v == var) {
            Some(entry) => entry.1 = field,
            None => self.entries.push((var, field)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(v, f)| (v.as_str(), f.as_str()))
    }

    /// Resolve every mapped variable through `lookup`.
    ///
    /// A variable `lookup` cannot find yields an empty string; the field is
    /// never omitted.
    pub fn extract_with<F>(&self, lookup: F) -> Vec<(String, FieldValue)>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.iter()
            .map(|(var, field)| {
                let value = lookup(var).unwrap_or_default();
                (field.to_string(), FieldValue::Str(value))
            })
            .collect()
    }

    /// Resolve every mapped variable from the process environment.
    pub fn extract(&self) -> Vec<(String, FieldValue)> {
        self.extract_with(|var| std::env::var(var).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_reads_lambda_variables() {
        let fields = EnvMapping::default().extract_with(|var| match var {
            FUNCTION_NAME_ENV => Some("checkout".to_string()),
            FUNCTION_VERSION_ENV => Some("$LATEST".to_string()),
            _ => None,
        });
        assert_eq!(
            fields,
            vec![
                ("functionName".to_string(), FieldValue::from("checkout")),
                ("functionVersion".to_string(), FieldValue::from("$LATEST")),
            ]
        );
    }

    #[test]
    fn unset_variables_become_empty_strings() {
        let fields = EnvMapping::default().extract_with(|_| None);
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|(_, v)| *v == FieldValue::from("")));
    }

    #[test]
    fn with_extends_and_retargets() {
        let mapping = EnvMapping::default()
            .with("AWS_REGION", "region")
            .with(FUNCTION_NAME_ENV, "fn");
        let fields: Vec<(&str, &str)> = mapping.iter().collect();
        assert_eq!(
            fields,
            vec![
                (FUNCTION_NAME_ENV, "fn"),
                (FUNCTION_VERSION_ENV, "functionVersion"),
                ("AWS_REGION", "region"),
            ]
        );
    }
}
