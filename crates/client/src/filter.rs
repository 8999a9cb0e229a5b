//! Deterministic query-string encoding for list/search filters.
//!
//! Fields are declared in order, so two runs over the same filter always
//! produce the same string. Parameter keys get their first character
//! lower-cased to match the API's query convention, empty values are
//! omitted, and list values expand into repeated `key=value` pairs.

use chrono::{DateTime, SecondsFormat, Utc};

/// A single filter field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Number(f64),
    Date(DateTime<Utc>),
    List(Vec<String>),
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}
impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}
impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}
impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}
impl From<DateTime<Utc>> for FilterValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}
impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}
impl From<Vec<&str>> for FilterValue {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(str::to_string).collect())
    }
}

/// An ordered set of named filter fields.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    fields: Vec<(String, FilterValue)>,
}

impl QueryFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field; output order follows declaration order.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Encodes the filter as `?a=1&b=2`, or an empty string when every
    /// field is empty or blank.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        for (name, value) in &self.fields {
            let key = lower_first(name);
            match value {
                FilterValue::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        pairs.push(format!("{key}={trimmed}"));
                    }
                }
                FilterValue::Int(n) => pairs.push(format!("{key}={n}")),
                FilterValue::Number(n) => pairs.push(format!("{key}={n}")),
                FilterValue::Date(d) => pairs.push(format!(
                    "{key}={}",
                    d.to_rfc3339_opts(SecondsFormat::Millis, true)
                )),
                FilterValue::List(items) => {
                    for item in items {
                        pairs.push(format!("{key}={item}"));
                    }
                }
            }
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    #[test]
    fn test_blank_and_list_expansion() {
        let filter = QueryFilter::new()
            .field("AccountTypeId", 3)
            .field("Name", "")
            .field("Tags", vec!["a", "b"]);
        assert_eq!(filter.to_query_string(), "?accountTypeId=3&tags=a&tags=b");
    }

    #[test]
    fn test_empty_filter_is_empty_string() {
        assert_eq!(QueryFilter::new().to_query_string(), "");
        let all_blank = QueryFilter::new()
            .field("Name", "   ")
            .field("Tags", Vec::<String>::new());
        assert_eq!(all_blank.to_query_string(), "");
    }

    #[test]
    fn test_scalar_is_trimmed() {
        let filter = QueryFilter::new().field("Name", "  main  ");
        assert_eq!(filter.to_query_string(), "?name=main");
    }

    #[test]
    fn test_date_is_iso_8601_with_millis() {
        let date = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let filter = QueryFilter::new().field("CreatedFrom", date);
        assert_eq!(
            filter.to_query_string(),
            "?createdFrom=2020-01-02T03:04:05.000Z"
        );
    }

    #[test]
    fn test_declaration_order_is_stable() {
        let filter = QueryFilter::new()
            .field("Zeta", 1)
            .field("Alpha", 2)
            .field("Mid", 3);
        assert_eq!(filter.to_query_string(), "?zeta=1&alpha=2&mid=3");
    }

    #[test]
    fn test_only_first_character_is_lowered() {
        let filter = QueryFilter::new().field("AccountTypeId", 1);
        assert_eq!(filter.to_query_string(), "?accountTypeId=1");
    }
}
