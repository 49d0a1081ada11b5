use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// One candidate page returned by the search backend.
///
/// Backends omit fields freely, send `null` for them, or use numbers where
/// text is expected, so every field has a default and is read leniently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct SearchResultItem {
    #[serde(deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub ingredients: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub how_to_use: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub price: Option<String>,
    #[serde(deserialize_with = "lenient::tags")]
    pub skin_types: Vec<String>,
    #[serde(deserialize_with = "lenient::tags")]
    pub benefits: Vec<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub trusted_source: bool,
}

/// Field readers that never reject a value, only fall back to the default.
mod lenient {
    use super::*;

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(scalar_text(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(scalar_text(Value::deserialize(d)?))
    }

    /// A list of tags, or a single tag given as a bare string.
    pub fn tags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(values) => values.into_iter().filter_map(scalar_text).collect(),
            Value::String(s) => vec![s],
            _ => Vec::new(),
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SearchResultItem {
    /// Blank optional text fields become `None`.
    pub fn normalized(mut self) -> Self {
        self.url = self.url.trim().to_string();
        self.ingredients = non_blank(self.ingredients);
        self.how_to_use = non_blank(self.how_to_use);
        self.price = non_blank(self.price);
        self
    }

    pub fn has_structured_tags(&self) -> bool {
        !self.skin_types.is_empty() || !self.benefits.is_empty()
    }

    pub fn summary_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Skin-type and benefit tags, deduplicated and kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Insights {
    pub skin_types: Vec<String>,
    pub benefits: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    let value = value.trim().to_lowercase();
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

impl Insights {
    pub fn add_skin_type(&mut self, tag: &str) {
        push_unique(&mut self.skin_types, tag);
    }

    pub fn add_benefit(&mut self, tag: &str) {
        push_unique(&mut self.benefits, tag);
    }

    pub fn merge(&mut self, other: &Insights) {
        for tag in &other.skin_types {
            self.add_skin_type(tag);
        }
        for tag in &other.benefits {
            self.add_benefit(tag);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.skin_types.is_empty() && self.benefits.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductInfo {
    pub product: Option<SearchResultItem>,
    pub insights: Insights,
}

impl ProductInfo {
    /// "Product not found" is a valid terminal state, not an error.
    pub fn not_found() -> Self {
        Self::default()
    }
}
