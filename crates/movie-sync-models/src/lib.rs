pub mod alert;
pub mod draft;
pub mod filter;
pub mod genre;
pub mod movie;

pub use alert::{AlertKind, AlertState};
pub use draft::{DraftField, FormDraft};
pub use filter::FilterState;
pub use genre::{Genre, ParseGenreError};
pub use movie::{MovieId, MovieRecord, NewMovie};
