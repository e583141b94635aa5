/// Authorization errors shared by the HTTP and GraphQL layers.
///
/// Identity itself is resolved by `server::middleware::jwt_auth`, which is
/// fail-open; callers that need an identity check for it and return one of
/// these errors.
mod errors;

pub use errors::AuthError;
