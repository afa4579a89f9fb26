pub mod auth;
pub mod filters;
pub mod form;
pub mod layout;
pub mod list;
pub mod modal;
pub mod pagination;
pub mod related;
pub mod stat_card;

pub use auth::*;
pub use filters::*;
pub use form::*;
pub use list::*;
pub use modal::*;
pub use pagination::*;
pub use related::*;
pub use stat_card::*;
