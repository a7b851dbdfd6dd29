pub mod alert;
pub mod filter;
pub mod store;
pub mod update_flow;
pub mod validation;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use alert::AlertManager;
pub use filter::{apply_filters, filter_by_genre, filter_by_search};
pub use store::{CatalogState, MovieStore, ViewState};
pub use update_flow::{UpdateFlow, UpdateFlowState, UpdateOutcome};
pub use validation::{validate_draft, ValidatedMovie, ValidationErrors};
pub use view::{Action, Outcome, SubmitOutcome, ViewController};
