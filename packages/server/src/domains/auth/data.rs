use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::auth::actions::LoginSession;
use crate::domains::users::data::UserData;

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
pub struct AuthPayload {
    /// Session token, valid for 15 minutes
    pub token: String,
    /// Null until a user record exists for the email
    pub user: Option<UserData>,
}

impl From<LoginSession> for AuthPayload {
    fn from(session: LoginSession) -> Self {
        Self {
            token: session.token,
            user: session.user.map(UserData::from),
        }
    }
}
