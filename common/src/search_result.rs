use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};


/// Facet payload as returned by Solr: field name to a flat `[name, count, name, count, ...]` array.
pub type FacetFields = BTreeMap<String, Vec<serde_json::Value>>;

/// One page of results plus the sidebar facet counts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResultDocuments {
    pub documents: Vec<Document>,
    /// Total match count reported by the index, not the length of `documents`.
    pub total_documents: u64,
    pub group_counts: GroupCounts,
    pub page: u64,
}

/// A record from the index. Read-only once retrieved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Document {
    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_str())
    }

    /// Integer field; numeric strings are accepted as well.
    pub fn integer(&self, field: &str) -> Option<i64> {
        match self.fields.get(field)? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// `'S'`/`'N'` indicator fields.
    pub fn is_flagged(&self, field: &str) -> bool {
        self.text(field).is_some_and(|v| v.eq_ignore_ascii_case("S"))
    }

    pub fn size_bytes(&self) -> Option<i64> {
        self.integer("tamanho_l")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub name: String,
    pub count: u64,
}

/// Sidebar groups, each sorted by count descending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupCounts {
    pub grupo_processo: Vec<FacetCount>,
    pub tipo_processo: Vec<FacetCount>,
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn document_keeps_unknown_fields() {
        let doc: Document = serde_json::from_str(
            r#"{"id":"doc-1","titulo_s":"Acórdão","tamanho_l":2048,"indicador_sigilo_s":"S","score":1.5,"extra_i":7}"#,
        )
        .unwrap();
        assert_eq!(doc.id(), Some("doc-1"));
        assert_eq!(doc.text("titulo_s"), Some("Acórdão"));
        assert_eq!(doc.size_bytes(), Some(2048));
        assert!(doc.is_flagged("indicador_sigilo_s"));
        assert!(!doc.is_flagged("arquivo_indexado_s"));
        assert_eq!(doc.score, Some(1.5));
        assert_eq!(doc.integer("extra_i"), Some(7));
    }
}
