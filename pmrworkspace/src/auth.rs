use base64::{
    Engine,
    engine::general_purpose::STANDARD,
};
use std::{
    env,
    fmt,
};

pub const AUTHORIZATION: &str = "Authorization";
pub const USERNAME_ENV: &str = "PMR_USERNAME";
pub const PASSWORD_ENV: &str = "PMR_PASSWORD";

/// The username/password pair used to authenticate against PMR.
///
/// These are only ever held in memory for the duration of the
/// workspace; nothing here persists them.
#[derive(Clone, Default, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Source of credentials, typically the authenticated session of the
/// application embedding the workspaces.
pub trait CredentialProvider {
    fn credentials(&self) -> Option<Credentials>;
}

/// Sources the credentials from the environment.
pub struct EnvCredentials {
    username_key: String,
    password_key: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty()
    }

    /// The value of the `Authorization` header, or `None` for anonymous
    /// access.
    pub fn basic_authorization(&self) -> Option<String> {
        if self.is_anonymous() {
            return None;
        }
        let token = STANDARD.encode(
            format!("{}:{}", self.username, self.password)
        );
        Some(format!("Basic {token}"))
    }

    /// The complete header line as passed on to the transport.
    pub fn authorization_header(&self) -> Option<String> {
        self.basic_authorization()
            .map(|value| format!("{AUTHORIZATION}: {value}"))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

impl CredentialProvider for Credentials {
    fn credentials(&self) -> Option<Credentials> {
        Some(self.clone())
    }
}

impl EnvCredentials {
    pub fn new(
        username_key: impl Into<String>,
        password_key: impl Into<String>,
    ) -> Self {
        Self {
            username_key: username_key.into(),
            password_key: password_key.into(),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(USERNAME_ENV, PASSWORD_ENV)
    }
}

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> Option<Credentials> {
        let username = env::var(&self.username_key).ok()?;
        let password = env::var(&self.password_key).unwrap_or_default();
        Some(Credentials::new(username, password))
    }
}
