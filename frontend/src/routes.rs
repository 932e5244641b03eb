use dioxus::prelude::*;

use crate::data_definitions::url_param::SearchUrlParams;
use crate::pages::search_page::SearchPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/?:..params")]
    SearchPage { params: SearchUrlParams },
}
