//! Solr query builder helpers for search requests.

use std::fmt::Display;

use common::{
    applied_filter::{AppliedFilter, FilterValue},
    filter_catalog,
    search_const::MATCH_ALL_QUERY,
    search_query::SearchRequest,
};
use serde::{Deserialize, Serialize};

use crate::config::SolrConfig;

/// Open side of a Solr range.
const UNBOUNDED: &str = "*";


/// One `fq` expression derived from an applied filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterClause {
    /// `field:("a" OR "b")`
    AnyOf { field: String, values: Vec<String> },
    /// `field:[from TO to]`, inclusive; `None` is open-ended.
    Range { field: String, from: Option<String>, to: Option<String> },
    /// `field:"value"`
    Phrase { field: String, value: String },
}

impl Display for FilterClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterClause::AnyOf { field, values } => {
                let values = values.iter().map(|v| quote_phrase(v)).collect::<Vec<_>>().join(" OR ");
                write!(f, "{field}:({values})")
            }
            FilterClause::Range { field, from, to } => write!(
                f,
                "{field}:[{} TO {}]",
                from.as_deref().unwrap_or(UNBOUNDED),
                to.as_deref().unwrap_or(UNBOUNDED),
            ),
            FilterClause::Phrase { field, value } => write!(f, "{field}:{}", quote_phrase(value)),
        }
    }
}

fn quote_phrase(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}


/// The `q` parameter. Solr needs an explicit match-all instead of an empty query.
pub fn build_query_term(query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        MATCH_ALL_QUERY.to_string()
    } else {
        query.to_string()
    }
}

/// One clause per filter; filters unknown to the catalog are dropped.
pub fn build_clauses(filters: &[AppliedFilter]) -> Vec<FilterClause> {
    filters.iter().filter_map(build_clause).collect()
}

fn build_clause(filter: &AppliedFilter) -> Option<FilterClause> {
    filter_catalog::lookup(&filter.id)?;
    let field = filter.field.clone();
    match &filter.value {
        FilterValue::List(values) => {
            if values.is_empty() {
                return None;
            }
            Some(FilterClause::AnyOf { field, values: values.clone() })
        }
        FilterValue::DateRange(range) => Some(FilterClause::Range {
            field,
            from: non_empty(&range.from),
            to: non_empty(&range.to),
        }),
        FilterValue::NumberRange(range) => Some(FilterClause::Range {
            field,
            from: range.from.map(|v| v.to_string()),
            to: range.to.map(|v| v.to_string()),
        }),
        FilterValue::Text(value) => Some(FilterClause::Phrase { field, value: value.clone() }),
    }
}

fn non_empty(bound: &str) -> Option<String> {
    let bound = bound.trim();
    (!bound.is_empty()).then(|| bound.to_string())
}

/// Full parameter list of a `select` request, in send order.
pub fn build_select_params(config: &SolrConfig, request: &SearchRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("q".to_string(), build_query_term(&request.query)),
        ("start".to_string(), request.offset().to_string()),
        ("rows".to_string(), request.page_size.to_string()),
        ("wt".to_string(), "json".to_string()),
        ("facet".to_string(), "true".to_string()),
        ("facet.limit".to_string(), config.facet_limit.to_string()),
        ("facet.mincount".to_string(), config.facet_min_count.to_string()),
        ("fl".to_string(), config.field_list.clone()),
    ];
    for field in &config.facet_fields {
        params.push(("facet.field".to_string(), field.clone()));
    }
    for clause in build_clauses(&request.filters) {
        params.push(("fq".to_string(), clause.to_string()));
    }
    params
}


#[cfg(test)]
mod tests {
    use common::applied_filter::{DateRange, NumberRange};
    use pretty_assertions::assert_eq;

    use super::*;

    fn filter(id: &str, value: FilterValue) -> AppliedFilter {
        AppliedFilter::new(id, value).unwrap()
    }

    #[test]
    fn empty_query_matches_all() {
        assert_eq!(build_query_term(""), "*:*");
        assert_eq!(build_query_term("   "), "*:*");
        assert_eq!(build_query_term("nota fiscal"), "nota fiscal");
    }

    #[test]
    fn open_date_range() {
        let clauses = build_clauses(&[filter("dt_juntada", FilterValue::DateRange(DateRange::new("2024-01-01", "")))]);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].to_string(), "dt_juntada_tdt:[2024-01-01 TO *]");
    }

    #[test]
    fn number_range() {
        let clauses = build_clauses(&[
            filter("valor_processo", FilterValue::NumberRange(NumberRange { from: None, to: Some(5000.0) })),
            filter("valor_processo", FilterValue::NumberRange(NumberRange { from: Some(10.5), to: Some(20.0) })),
        ]);
        assert_eq!(clauses[0].to_string(), "valor_processo_d:[* TO 5000]");
        assert_eq!(clauses[1].to_string(), "valor_processo_d:[10.5 TO 20]");
    }

    #[test]
    fn list_is_or_of_phrases() {
        let clauses = build_clauses(&[filter("tipo_processo", FilterValue::List(vec!["Recurso".into(), "Impugnação".into()]))]);
        assert_eq!(clauses[0].to_string(), r#"tipo_processo_s:("Recurso" OR "Impugnação")"#);
    }

    #[test]
    fn text_is_exact_phrase_with_escaping() {
        let clauses = build_clauses(&[filter("titulo_documento", FilterValue::Text(r#"Termo "A""#.into()))]);
        assert_eq!(clauses[0].to_string(), r#"titulo_s:"Termo \"A\"""#);
    }

    #[test]
    fn unknown_and_empty_filters_are_dropped() {
        let mut stale = filter("nr_processo", FilterValue::Text("1".into()));
        stale.id = "gone".into();
        let empty = filter("tipo_processo", FilterValue::List(vec![]));
        assert!(build_clauses(&[stale, empty]).is_empty());
    }

    #[test]
    fn select_params() {
        let request = SearchRequest {
            query: "nota fiscal".into(),
            filters: vec![filter("dt_juntada", FilterValue::DateRange(DateRange::new("2024-01-01", "")))],
            page: 3,
            page_size: 20,
        };
        let params = build_select_params(&SolrConfig::default(), &request);
        let get_all = |key: &str| params.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str()).collect::<Vec<_>>();

        assert_eq!(get_all("q"), vec!["nota fiscal"]);
        assert_eq!(get_all("start"), vec!["40"]);
        assert_eq!(get_all("rows"), vec!["20"]);
        assert_eq!(get_all("wt"), vec!["json"]);
        assert_eq!(get_all("facet"), vec!["true"]);
        assert_eq!(get_all("facet.limit"), vec!["50"]);
        assert_eq!(get_all("facet.mincount"), vec!["1"]);
        assert_eq!(get_all("facet.field"), vec!["grupo_processo_s", "tipo_processo_s"]);
        assert_eq!(get_all("fq"), vec!["dt_juntada_tdt:[2024-01-01 TO *]"]);
        assert!(get_all("fl")[0].starts_with("id,processo_s,"));
    }
}
