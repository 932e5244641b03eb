//! Static registry of the filters a user can apply to a search.

use serde::{Deserialize, Serialize};

use crate::applied_filter::FilterValue;


/// Kind of value a filter holds. Each kind accepts exactly one [`FilterValue`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterValueType {
    Text,
    MultiSelectText,
    DateRange,
    NumberRange,
}

impl FilterValueType {
    pub fn accepts(self, value: &FilterValue) -> bool {
        match (self, value) {
            (FilterValueType::Text, FilterValue::Text(_)) => true,
            (FilterValueType::MultiSelectText, FilterValue::List(_)) => true,
            (FilterValueType::DateRange, FilterValue::DateRange(_)) => true,
            (FilterValueType::NumberRange, FilterValue::NumberRange(_)) => true,
            _ => false,
        }
    }

    /// Only list filters may be applied more than once under the same id.
    pub fn allows_repeats(self) -> bool {
        matches!(self, FilterValueType::MultiSelectText)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterDefinition {
    pub id: &'static str,
    pub label: &'static str,
    /// Solr field the filter constrains.
    pub field: &'static str,
    pub value_type: FilterValueType,
    pub placeholder: Option<&'static str>,
    pub helper_text: Option<&'static str>,
}

const DATE_HELPER: &str = "Padrão: DD/MM/YYYY";
const SEARCH_PLACEHOLDER: &str = "Digite para buscar...";

const fn date_range(id: &'static str, label: &'static str, field: &'static str) -> FilterDefinition {
    FilterDefinition { id, label, field, value_type: FilterValueType::DateRange, placeholder: None, helper_text: Some(DATE_HELPER) }
}

const fn multi_select(id: &'static str, label: &'static str, field: &'static str) -> FilterDefinition {
    FilterDefinition { id, label, field, value_type: FilterValueType::MultiSelectText, placeholder: Some(SEARCH_PLACEHOLDER), helper_text: None }
}

const fn text(id: &'static str, label: &'static str, field: &'static str, placeholder: &'static str) -> FilterDefinition {
    FilterDefinition { id, label, field, value_type: FilterValueType::Text, placeholder: Some(placeholder), helper_text: None }
}

pub static AVAILABLE_FILTERS: &[FilterDefinition] = &[
    // dates
    date_range("dt_protocolo", "Data do Protocolo", "dt_protocolo_tdt"),
    date_range("dt_juntada", "Data da Juntada", "dt_juntada_tdt"),
    date_range("dt_registro", "Data de Registro", "dt_registro_tdt"),
    date_range("dt_anexacao", "Data de Anexação", "dt_anexacao_tdt"),

    // multi-select
    multi_select("tipo_documento", "Tipo Documento", "tipo_documento_s"),
    multi_select("unidade_origem", "Unidade Origem", "unidade_origem_s"),
    multi_select("equipe_origem", "Equipe Origem", "equipe_origem_s"),
    multi_select("tipo_processo", "Tipo Processo", "tipo_processo_s"),
    multi_select("subtipo_processo", "Subtipo Processo", "subtipo_processo_s"),
    multi_select("tributo_act", "Tributo ACT", "tributo_act_s"),
    multi_select("alegacoes_recurso", "Alegações no Recurso", "alegacoes_recurso_s"),
    multi_select("unidade_atual", "Unidade Atual", "nome_unidade_atual_s"),
    multi_select("equipe_atual", "Equipe Atual", "nome_equipe_atual_s"),
    multi_select("grupo_processo", "Grupo Processo", "grupo_processo_s"),
    multi_select("situacao_processo", "Situação Processo", "situacao_s"),
    multi_select("result_julgamento_drj_1", "Result Julgamento DRJ nível 1", "result_julgamento_drj_nivel_1_s"),
    multi_select("result_julgamento_drj_2", "Result Julgamento DRJ nível 2", "result_julgamento_drj_nivel_2_s"),

    // free text
    text("cpf_responsavel", "CPF Responsável", "cpf_responsavel_s", "Digite o CPF..."),
    text("nome_usuario_juntada", "Nome Usuário Juntada", "nome_usuario_juntada_doc_s", "Digite o nome..."),
    text("ni_contribuinte", "NI Contribuinte", "ni_contribuinte_s", "Digite CPF/CNPJ..."),
    text("assuntos_objetos", "Assuntos/Objetos", "assuntos_objetos_s", "Digite o assunto..."),
    text("titulo_documento", "Título Documento", "titulo_s", "Digite o título..."),
    text("nr_processo", "Nr Processo", "processo_s", "Digite o número do processo..."),
    text("nr_doc_principal", "Nr Doc Principal", "nr_doc_principal_s", "Digite o número..."),
    text("nome_contribuinte", "Nome do Contribuinte", "nome_contribuinte_s", "Digite o nome..."),
    text("nome_relator_drj", "Nome Relator DRJ", "nome_relator_drj_s", "Digite o nome..."),

    // numeric
    FilterDefinition {
        id: "valor_processo",
        label: "Valor Processo",
        field: "valor_processo_d",
        value_type: FilterValueType::NumberRange,
        placeholder: Some("De / Até"),
        helper_text: None,
    },
];

/// Find a filter definition by id. A miss means "ignore this filter", never an error for the caller.
pub fn lookup(id: &str) -> Option<&'static FilterDefinition> {
    AVAILABLE_FILTERS.iter().find(|filter| filter.id == id)
}

pub fn all() -> &'static [FilterDefinition] {
    AVAILABLE_FILTERS
}


/// Named category used to organize the filter-editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterGroup {
    pub key: &'static str,
    pub label: &'static str,
    pub filter_ids: &'static [&'static str],
}

pub static FILTER_GROUPS: &[FilterGroup] = &[
    FilterGroup { key: "datas", label: "Datas", filter_ids: &["dt_protocolo", "dt_juntada", "dt_registro", "dt_anexacao"] },
    FilterGroup {
        key: "processo",
        label: "Processo",
        filter_ids: &["tipo_processo", "subtipo_processo", "grupo_processo", "situacao_processo", "nr_processo", "valor_processo"],
    },
    FilterGroup { key: "documento", label: "Documento", filter_ids: &["tipo_documento", "titulo_documento", "nr_doc_principal"] },
    FilterGroup {
        key: "unidades",
        label: "Unidades e Equipes",
        filter_ids: &["unidade_origem", "unidade_atual", "equipe_origem", "equipe_atual"],
    },
    FilterGroup { key: "contribuinte", label: "Contribuinte", filter_ids: &["nome_contribuinte", "ni_contribuinte", "cpf_responsavel"] },
    FilterGroup { key: "tributario", label: "Tributário", filter_ids: &["tributo_act", "assuntos_objetos"] },
    FilterGroup {
        key: "julgamento",
        label: "Julgamento",
        filter_ids: &["result_julgamento_drj_1", "result_julgamento_drj_2", "alegacoes_recurso", "nome_relator_drj"],
    },
    FilterGroup { key: "outros", label: "Outros", filter_ids: &["nome_usuario_juntada"] },
];

pub fn groups() -> &'static [FilterGroup] {
    FILTER_GROUPS
}

/// Definitions of a group in display order; ids missing from the catalog are skipped.
pub fn filters_in_group(group: &FilterGroup) -> Vec<&'static FilterDefinition> {
    group.filter_ids.iter().filter_map(|id| lookup(id)).collect()
}
