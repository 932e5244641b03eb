//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod error;
pub mod filter_catalog;
pub mod applied_filter;
pub mod filter_codec;
pub mod url_state;
pub mod search_query;
pub mod search_result;
pub mod search_state;
pub mod search_const;
