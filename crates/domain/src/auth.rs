use derive_more::Deref;
use uuid::Uuid;

use crate::{DeleteError, ReadError};

/// Read access to the identity-provider session. The core never subscribes
/// to auth state changes itself; it is handed an accessor.
#[allow(async_fn_in_trait)]
pub trait AuthRepository {
    async fn current_user(&self) -> Result<Option<User>, ReadError>;
    async fn sign_out(&self) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait AuthService {
    async fn get_current_user(&self) -> Result<Option<User>, ReadError>;
    async fn sign_out(&self) -> Result<(), DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub email: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
