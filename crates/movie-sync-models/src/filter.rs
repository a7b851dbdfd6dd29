use serde::{Deserialize, Serialize};

use crate::genre::Genre;

/// Active list filters; `None` genre and empty search mean "show everything".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub genre: Option<Genre>,
    pub search_text: String,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.search_text.is_empty()
    }
}
