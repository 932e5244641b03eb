//! Solr connection settings read from the environment.

use std::time::Duration;

use common::search_const::{DOCUMENT_FIELD_LIST, FACET_LIMIT, FACET_MIN_COUNT, GROUP_FACET_FIELDS};

const DEFAULT_SOLR_URL: &str = "http://localhost:8983/solr";
const DEFAULT_SOLR_CORE: &str = "eprocesso";

#[derive(Debug, Clone, PartialEq)]
pub struct SolrConfig {
    pub base_url: String,
    pub core: String,
    /// No timeout unless `SOLR_TIMEOUT_SECS` is set.
    pub request_timeout: Option<Duration>,
    pub facet_fields: Vec<String>,
    pub facet_limit: u32,
    pub facet_min_count: u32,
    pub field_list: String,
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOLR_URL.to_string(),
            core: DEFAULT_SOLR_CORE.to_string(),
            request_timeout: None,
            facet_fields: GROUP_FACET_FIELDS.iter().map(|f| f.to_string()).collect(),
            facet_limit: FACET_LIMIT,
            facet_min_count: FACET_MIN_COUNT,
            field_list: DOCUMENT_FIELD_LIST.join(","),
        }
    }
}

impl SolrConfig {
    /// Reads `SOLR_URL`, `SOLR_CORE` and `SOLR_TIMEOUT_SECS`, keeping defaults for
    /// anything missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("SOLR_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(core) = lookup("SOLR_CORE").filter(|v| !v.trim().is_empty()) {
            config.core = core.trim().to_string();
        }
        config.request_timeout = lookup("SOLR_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        config
    }

    pub fn select_url(&self) -> String {
        format!("{}/{}/select", self.base_url.trim_end_matches('/'), self.core)
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> SolrConfig {
        let vars = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<HashMap<_, _>>();
        SolrConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.select_url(), "http://localhost:8983/solr/eprocesso/select");
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.facet_fields, vec!["grupo_processo_s", "tipo_processo_s"]);
    }

    #[test]
    fn env_overrides() {
        let config = config_from(&[("SOLR_URL", "http://solr:8983/solr/"), ("SOLR_CORE", "docs"), ("SOLR_TIMEOUT_SECS", "15")]);
        assert_eq!(config.select_url(), "http://solr:8983/solr/docs/select");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_timeout_is_ignored() {
        let config = config_from(&[("SOLR_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.request_timeout, None);
    }
}
