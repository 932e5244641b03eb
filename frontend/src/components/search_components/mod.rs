pub mod filter_editor;
pub mod search_facets;
pub mod search_history;
pub mod search_input_top_bar;
pub mod search_result_list_controls;
pub mod search_results_table;
pub mod selected_filters;
