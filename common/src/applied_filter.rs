//! Applied filter values and their identity rules.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::FilterError,
    filter_catalog::{self, FilterDefinition, FilterValueType},
    filter_codec,
};


/// Date interval; an empty side is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    #[serde(deserialize_with = "null_as_empty")]
    pub from: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numeric interval; `None` on a side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
    DateRange(DateRange),
    NumberRange(NumberRange),
}

impl FilterValue {
    pub fn value_type(&self) -> FilterValueType {
        match self {
            FilterValue::Text(_) => FilterValueType::Text,
            FilterValue::List(_) => FilterValueType::MultiSelectText,
            FilterValue::DateRange(_) => FilterValueType::DateRange,
            FilterValue::NumberRange(_) => FilterValueType::NumberRange,
        }
    }
}


/// A user-selected constraint bound to a catalog definition.
///
/// Two filters are equal when their `(id, value)` pair is equal. `label`, `field` and
/// `display_value` are copies taken at creation time and do not take part in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedFilter {
    pub id: String,
    pub label: String,
    pub field: String,
    pub value: FilterValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

impl PartialEq for AppliedFilter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.value == other.value
    }
}

impl AppliedFilter {
    pub fn from_definition(definition: &FilterDefinition, value: FilterValue) -> Result<Self, FilterError> {
        if !definition.value_type.accepts(&value) {
            return Err(FilterError::ValueTypeMismatch {
                id: definition.id.to_string(),
                expected: definition.value_type,
            });
        }
        let mut filter = Self {
            id: definition.id.to_string(),
            label: definition.label.to_string(),
            field: definition.field.to_string(),
            value,
            display_value: None,
        };
        filter.display_value = Some(filter_codec::display_value(&filter));
        Ok(filter)
    }

    pub fn new(id: &str, value: FilterValue) -> Result<Self, FilterError> {
        let definition = filter_catalog::lookup(id).ok_or_else(|| FilterError::UnknownFilter(id.to_string()))?;
        Self::from_definition(definition, value)
    }

    pub fn definition(&self) -> Option<&'static FilterDefinition> {
        filter_catalog::lookup(&self.id)
    }

    /// Chip text: the precomputed display value, or a freshly formatted one.
    pub fn display_text(&self) -> String {
        self.display_value.clone().unwrap_or_else(|| filter_codec::display_value(self))
    }
}

/// Add `filter` to an ordered filter list. Returns false when nothing changed.
///
/// An identical `(id, value)` is a no-op. List filters may repeat an id; any other type
/// holds one value per id, so a new value replaces the existing entry where it stands.
pub fn merge_filter(filters: &mut Vec<AppliedFilter>, filter: AppliedFilter) -> bool {
    if filters.contains(&filter) {
        return false;
    }
    if !filter.value.value_type().allows_repeats() {
        if let Some(existing) = filters.iter_mut().find(|f| f.id == filter.id) {
            *existing = filter;
            return true;
        }
    }
    filters.push(filter);
    true
}
