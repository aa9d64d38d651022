//! Sessions

use boxcart::uuids::TypedUuid;

/// Marker for user ids.
#[derive(Debug)]
pub enum User {}

/// Authenticated user id.
pub type UserUuid = TypedUuid<User>;

/// Who the cart belongs to right now.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    /// Not signed in; only the device's cart exists.
    #[default]
    Anonymous,

    /// Signed in as the given user.
    Authenticated(UserUuid),
}

impl Session {
    /// The signed-in user, if any.
    pub fn user(&self) -> Option<UserUuid> {
        match self {
            Session::Authenticated(user) => Some(*user),
            Session::Anonymous => None,
        }
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

impl From<Option<UserUuid>> for Session {
    fn from(user: Option<UserUuid>) -> Self {
        user.map_or(Session::Anonymous, Session::Authenticated)
    }
}
