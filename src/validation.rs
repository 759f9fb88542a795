//! Per-field validation messages collected before any write.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Hands back `value` when nothing was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    /// Trimmed copy of `value`, recording `message` when it is blank.
    pub fn required(&mut self, field: &str, value: &str, message: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, message);
        }
        trimmed.to_string()
    }

    pub fn required_id(
        &mut self,
        field: &str,
        value: Option<uuid::Uuid>,
        message: &str,
    ) -> uuid::Uuid {
        value.unwrap_or_else(|| {
            self.add(field, message);
            uuid::Uuid::nil()
        })
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Blank optional strings are stored as NULL.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_messages_per_field() {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", "   ", "Name is required");
        errors.add("code", "Code is required");
        errors.add("code", "Code is too long");

        assert_eq!(name, "");
        assert_eq!(errors.get("name"), Some(&["Name is required".to_string()][..]));
        assert_eq!(errors.get("code").map(<[String]>::len), Some(2));
        assert!(errors.finish(()).is_err());
    }

    #[test]
    fn serializes_as_a_plain_map() {
        let mut errors = FieldErrors::new();
        errors.add("endYear", "End year must be after start year");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["endYear"][0], "End year must be after start year");
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("admin@cams.com"));
        assert!(is_valid_email("a.b+c@dept.college.edu"));
        assert!(!is_valid_email("admin"));
        assert!(!is_valid_email("@cams.com"));
        assert!(!is_valid_email("admin@cams"));
        assert!(!is_valid_email("admin@@cams.com"));
        assert!(!is_valid_email("ad min@cams.com"));
    }

    #[test]
    fn blank_optional_text_becomes_none() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" 101 ".into())), Some("101".into()));
        assert_eq!(optional_text(None), None);
    }
}
