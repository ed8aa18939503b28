//! ZOQL query strings and the page model returned by the action endpoints.

pub mod page;
pub mod zoql;

pub use page::*;
pub use zoql::*;
