/// Defines a common error type to use for all request handlers.
mod error;

/// Contains definitions for application-specific parameters to handler functions,
/// such as `AuthUser` which checks for the `x-auth-token` header in the request,
/// verifies the value as a JWT and checks the signature,
/// then deserializes the information it contains.
pub mod extractor;

/// Request-body extraction that runs structural validation before the
/// handler ever sees the value.
pub mod validation;

// Modules introducing API routes, one per resource. The two resources have the
// same lifecycle shape but deliberately different guard chains; see the route
// tables in each module.
mod posts;
mod profiles;

pub mod server;
pub use server::serve;

pub mod api_context;
pub use api_context::ApiContext;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
