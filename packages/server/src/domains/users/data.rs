use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::users::models::{Role, User};

/// User GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(name = "User", description = "A registered user")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role granted in session tokens for this email
    pub role: Role,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}
