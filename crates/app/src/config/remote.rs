//! Remote Config

use clap::Args;
use uuid::Uuid;

use crate::session::UserUuid;

/// Cart server settings. Without a user the session is anonymous and the
/// server is never contacted.
#[derive(Debug, Args)]
pub struct RemoteConfig {
    /// Cart server base URL
    #[arg(
        long,
        env = "BOXCART_API_URL",
        default_value = "http://localhost:8698",
        global = true
    )]
    pub api_url: String,

    /// Bearer token for the cart server
    #[arg(long, env = "BOXCART_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// Signed-in user id
    #[arg(long, env = "BOXCART_USER", global = true)]
    pub user: Option<Uuid>,

    /// Copy device-only lines to the server cart when signing in
    #[arg(long, env = "BOXCART_MIGRATE_ON_SIGN_IN", default_value_t = false, global = true)]
    pub migrate_on_sign_in: bool,
}

impl RemoteConfig {
    /// The user to sign in as, if any.
    pub fn user(&self) -> Option<UserUuid> {
        self.user.map(UserUuid::from_uuid)
    }
}
