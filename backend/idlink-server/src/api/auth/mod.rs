#[allow(clippy::module_inception)]
pub mod auth;
pub mod signup_request;
