//! REST client for the user resource
//!
//! The form controller talks to the backend only through [`UserApi`], so tests
//! and alternative transports can stand in for [`HttpUserApi`].

pub mod http;

use async_trait::async_trait;
use strum_macros::Display;

use crate::{
    error::Result,
    models::users::{NewUser, User, UserId},
};

pub use http::HttpUserApi;

/// The five calls of the user resource contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ApiOperation {
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

/// Backend operations consumed by the user form.
///
/// Implementations enforce the contract's success status for each call and
/// report anything else as an error; a missing record on lookup is `Ok(None)`.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// GET `/user`: every record, unwrapped from the `{ data: [...] }` envelope
    async fn list_users(&self) -> Result<Vec<User>>;

    /// GET `/user/{id}`: `Some` on 200, `None` on 204
    async fn get_user(&self, id: &str) -> Result<Option<User>>;

    /// POST `/user`, expecting 201. The echoed body is not needed; the list is reloaded.
    async fn create_user(&self, user: &NewUser) -> Result<()>;

    /// PUT `/user/{id}` with the full record, expecting 200
    async fn update_user(&self, user: &User) -> Result<()>;

    /// DELETE `/user/{id}`, expecting 200
    async fn delete_user(&self, id: &UserId) -> Result<()>;
}
