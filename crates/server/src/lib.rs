pub mod routes;
pub mod startup;
pub mod errors;
pub mod auth;
pub mod rate_limit;
pub mod observability;
pub mod openapi;

pub use startup::run;
