//! Facet response shaping for the sidebar groups.

use common::{
    search_const::{FACET_FIELD_GRUPO_PROCESSO, FACET_FIELD_TIPO_PROCESSO},
    search_result::{FacetCount, FacetFields, GroupCounts},
};

/// Pair up Solr's flat facet arrays into the two sidebar groups. Missing fields give empty groups.
pub fn process_facets(facets: &FacetFields) -> GroupCounts {
    let field = |name: &str| facets.get(name).map(|values| process_facet_field(values)).unwrap_or_default();
    GroupCounts {
        grupo_processo: field(FACET_FIELD_GRUPO_PROCESSO),
        tipo_processo: field(FACET_FIELD_TIPO_PROCESSO),
    }
}

// solr returns [name, count, name, count, ...]
fn process_facet_field(values: &[serde_json::Value]) -> Vec<FacetCount> {
    let mut result = values
        .chunks_exact(2)
        .map(|pair| FacetCount {
            name: match &pair[0] {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            count: facet_count(&pair[1]),
        })
        .collect::<Vec<_>>();
    // stable: ties keep backend order
    result.sort_by_key(|item| u64::MAX - item.count);
    result
}

fn facet_count(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
