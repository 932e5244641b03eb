//! Search constants shared by the client and the Solr access layer.

/// Number of documents per result page.
pub const PAGE_SIZE: u64 = 20;

/// Number of past searches kept in the history, newest first.
pub const SEARCH_HISTORY_LIMIT: usize = 10;

/// Quiet window for live-input searches.
pub const DEBOUNCE_MS: u64 = 500;

/// Solr query that matches every document. Solr rejects an empty `q`.
pub const MATCH_ALL_QUERY: &str = "*:*";

pub const FACET_LIMIT: u32 = 50;
pub const FACET_MIN_COUNT: u32 = 1;

pub const FACET_FIELD_GRUPO_PROCESSO: &str = "grupo_processo_s";
pub const FACET_FIELD_TIPO_PROCESSO: &str = "tipo_processo_s";

/// Facet fields requested with every search, one per sidebar group.
pub const GROUP_FACET_FIELDS: [&str; 2] = [FACET_FIELD_GRUPO_PROCESSO, FACET_FIELD_TIPO_PROCESSO];

/// Stored fields returned for each result row.
pub const DOCUMENT_FIELD_LIST: &[&str] = &[
    "id",
    "processo_s",
    "tipo_processo_s",
    "subtipo_processo_s",
    "grupo_processo_s",
    "nome_arquivo_s",
    "titulo_s",
    "tipo_documento_s",
    "situacao_s",
    "dt_juntada_tdt",
    "nome_contribuinte_s",
    "ni_contribuinte_s",
    "unidade_origem_s",
    "nome_usuario_juntada_doc_s",
    "tamanho_l",
    "score",
];
