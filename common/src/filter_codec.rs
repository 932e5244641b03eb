//! Conversions between filter values and their URL and display strings.

use chrono::NaiveDate;

use crate::{
    applied_filter::{AppliedFilter, DateRange, FilterValue, NumberRange},
    error::FilterError,
    filter_catalog::{self, FilterDefinition, FilterValueType},
};

/// Separator between list items in a URL parameter.
pub const LIST_DELIMITER: char = ',';
const ESCAPE: char = '\\';

const ANY_DATE: &str = "Qualquer data";
const ANY_VALUE: &str = "Qualquer valor";


pub fn encode(filter: &AppliedFilter) -> String {
    encode_value(&filter.value)
}

/// URL form of a value. List items escape the delimiter and the escape character
/// with a backslash so items containing commas survive a round trip.
pub fn encode_value(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(text) => text.clone(),
        FilterValue::List(items) => items
            .iter()
            .map(|item| escape_list_item(item))
            .collect::<Vec<_>>()
            .join(&LIST_DELIMITER.to_string()),
        FilterValue::DateRange(range) => serde_json::to_string(range).unwrap_or_default(),
        FilterValue::NumberRange(range) => serde_json::to_string(range).unwrap_or_default(),
    }
}

fn escape_list_item(item: &str) -> String {
    let mut escaped = String::with_capacity(item.len());
    for c in item.chars() {
        if c == ESCAPE || c == LIST_DELIMITER {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

pub fn decode(definition: &FilterDefinition, raw: &str) -> Result<FilterValue, FilterError> {
    let decode_error = |e: serde_json::Error| FilterError::Decode {
        id: definition.id.to_string(),
        reason: e.to_string(),
    };
    match definition.value_type {
        FilterValueType::Text => Ok(FilterValue::Text(raw.to_string())),
        FilterValueType::MultiSelectText => Ok(FilterValue::List(split_list(raw))),
        FilterValueType::DateRange => serde_json::from_str::<DateRange>(raw)
            .map(FilterValue::DateRange)
            .map_err(decode_error),
        FilterValueType::NumberRange => serde_json::from_str::<NumberRange>(raw)
            .map(FilterValue::NumberRange)
            .map_err(decode_error),
    }
}

/// Split on unescaped delimiters. Input without a delimiter yields a single item.
fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(next) => current.push(next),
                None => current.push(ESCAPE),
            },
            LIST_DELIMITER => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);
    items
}


pub fn display_value(filter: &AppliedFilter) -> String {
    match &filter.value {
        FilterValue::Text(text) => text.clone(),
        FilterValue::List(items) => {
            if items.len() > 2 {
                format!("{} +{}", items[..2].join(", "), items.len() - 2)
            } else {
                items.join(", ")
            }
        }
        FilterValue::DateRange(range) => match (range.from.is_empty(), range.to.is_empty()) {
            (false, false) => format!("{} até {}", format_date(&range.from), format_date(&range.to)),
            (false, true) => format!("A partir de {}", format_date(&range.from)),
            (true, false) => format!("Até {}", format_date(&range.to)),
            (true, true) => ANY_DATE.to_string(),
        },
        FilterValue::NumberRange(range) => match (range.from, range.to) {
            (Some(from), Some(to)) => format!("{} - {}", format_currency(from), format_currency(to)),
            (Some(from), None) => format!("A partir de {}", format_currency(from)),
            (None, Some(to)) => format!("Até {}", format_currency(to)),
            (None, None) => ANY_VALUE.to_string(),
        },
    }
}

/// `2024-01-31` or `2024-01-31T00:00:00Z` as `31/01/2024`; anything else is shown as is.
fn format_date(raw: &str) -> String {
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Brazilian real formatting: `R$ 1.234,56`.
fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let total_cents = (value.abs() * 100.0).round() as u64;
    let digits = (total_cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{sign}R$ {grouped},{:02}", total_cents % 100)
}


/// A filter is worth applying when its id is known, its value matches the declared
/// type and it actually constrains something. Blank list items and range bounds don't count.
pub fn is_filter_valid(filter: &AppliedFilter) -> bool {
    let Some(definition) = filter_catalog::lookup(&filter.id) else {
        return false;
    };
    if !definition.value_type.accepts(&filter.value) {
        return false;
    }
    match &filter.value {
        FilterValue::Text(text) => !text.trim().is_empty(),
        FilterValue::List(items) => items.iter().any(|item| !item.trim().is_empty()),
        FilterValue::DateRange(range) => !range.from.trim().is_empty() || !range.to.trim().is_empty(),
        FilterValue::NumberRange(range) => {
            let bounds = [range.from, range.to];
            bounds.iter().any(Option::is_some) && bounds.iter().flatten().all(|v| v.is_finite())
        }
    }
}
