use std::sync::Arc;

use crate::common::AuthError;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared dependencies plus the identity resolved for this request, if any.
#[derive(Clone)]
pub struct GraphQLContext {
    pub deps: Arc<ServerDeps>,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: Arc<ServerDeps>, auth_user: Option<AuthUser>) -> Self {
        Self { deps, auth_user }
    }

    /// The caller's identity, or an error if the request carried no valid token
    pub fn require_auth(&self) -> Result<&AuthUser, AuthError> {
        self.auth_user.as_ref().ok_or(AuthError::AuthenticationRequired)
    }

    pub fn require_admin(&self) -> Result<&AuthUser, AuthError> {
        let user = self.require_auth()?;
        if !user.is_admin() {
            return Err(AuthError::AdminRequired);
        }
        Ok(user)
    }
}
