//! HTTP request handlers.
//!
//! Pages answer with JSON view models; form pages answer 422 with the
//! submitted values and per-field errors when a submission is rejected.

pub mod auth_handler;
pub mod index_handler;
pub mod lab_handler;
pub mod session_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use index_handler::index_routes;
pub use lab_handler::lab_routes;
pub use session_handler::session_routes;
pub use user_handler::user_routes;
