// handlers/mod.rs - one module per resource
//
// Every handler takes the shared AppState, performs its statement(s) through
// the repository and maps the outcome to a status code. No route requires
// authentication; login/register are the only credential-aware endpoints.

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod lessons;
pub mod progress;
pub mod quiz;
pub mod system;
pub mod users;

/// A field counts as supplied only when it is present and non-empty
pub(crate) fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
