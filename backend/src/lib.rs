//! Server-side access to the Solr document index.

pub mod api;
pub mod config;
pub mod db_utils;
