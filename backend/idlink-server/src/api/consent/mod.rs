#[allow(clippy::module_inception)]
pub mod consent;
pub mod consent_version_list_response;
