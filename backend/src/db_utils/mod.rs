//! Index client helpers.

pub mod solr_utils;
