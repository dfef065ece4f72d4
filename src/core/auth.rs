//! Identity and seller access
//!
//! Authentication itself belongs to an external identity service. The
//! storefront only sees it through [`IdentityProvider`]: sign-in, sign-up,
//! sign-out and an observable current user.
//!
//! Listing a vehicle for sale needs one more step on top of a normal
//! session, handled by [`SellerGate`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

use crate::core::error::AuthError;
use crate::core::events::{EventBus, StoreEvent};
use crate::core::field::FieldFormat;

/// A signed-in user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Sign-in method (`password`, `google`, ...)
    pub provider: String,
}

/// Trait for identity providers
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn sign_up(&self, email: &str, password: &str, full_name: &str)
    -> Result<User, AuthError>;

    /// Sign in through a third-party provider such as `google`
    async fn sign_in_with_oauth(&self, provider: &str) -> Result<User, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    fn current_user(&self) -> Option<User>;

    /// Observe the current user; the receiver always holds the latest value
    fn subscribe(&self) -> watch::Receiver<Option<User>>;

    /// Session changes as a stream
    fn session_changes(&self) -> WatchStream<Option<User>> {
        WatchStream::new(self.subscribe())
    }
}

/// Development identity provider
///
/// Accepts any well-formed email with a non-empty password and never talks
/// to a remote service.
#[derive(Debug)]
pub struct MockIdentityProvider {
    session: watch::Sender<Option<User>>,
}

impl MockIdentityProvider {
    pub const MOCK_USER_ID: &'static str = "mock-user-id";
    pub const DEMO_EMAIL: &'static str = "demo@example.com";

    /// Create a provider with nobody signed in
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self { session }
    }

    /// Create a provider with the demo user already signed in
    pub fn with_demo_user() -> Self {
        let provider = Self::new();
        provider.session.send_replace(Some(User {
            id: Self::MOCK_USER_ID.to_string(),
            email: Self::DEMO_EMAIL.to_string(),
            full_name: None,
            provider: "password".to_string(),
        }));
        provider
    }

    fn start_session(&self, user: User) -> User {
        tracing::info!(user_id = %user.id, provider = %user.provider, "user signed in");
        self.session.send_replace(Some(user.clone()));
        user
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn check_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if password.is_empty() || !FieldFormat::Email.validate(email) {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(())
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        check_credentials(email, password)?;
        Ok(self.start_session(User {
            id: Self::MOCK_USER_ID.to_string(),
            email: email.trim().to_string(),
            full_name: None,
            provider: "password".to_string(),
        }))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<User, AuthError> {
        check_credentials(email, password)?;
        let full_name = full_name.trim();
        Ok(self.start_session(User {
            id: Self::MOCK_USER_ID.to_string(),
            email: email.trim().to_string(),
            full_name: (!full_name.is_empty()).then(|| full_name.to_string()),
            provider: "password".to_string(),
        }))
    }

    async fn sign_in_with_oauth(&self, provider: &str) -> Result<User, AuthError> {
        let provider = provider.trim().to_lowercase();
        if provider.is_empty() {
            return Err(AuthError::Provider {
                message: "no oauth provider given".to_string(),
            });
        }
        Ok(self.start_session(User {
            id: format!("{provider}-user-id"),
            email: format!("{provider}-user@example.com"),
            full_name: None,
            provider,
        }))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.session.send_replace(None).is_some() {
            tracing::info!("user signed out");
        }
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.session.subscribe()
    }
}

/// Credentials unlocking the "sell your bike" flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerCredentials {
    pub email: String,
    pub password: String,
}

/// Extra check in front of the listing flow
///
/// Without configured credentials the gate runs in development mode and
/// lets any signed-in user through. Access is dropped on sign-out.
#[derive(Debug, Default)]
pub struct SellerGate {
    credentials: Option<SellerCredentials>,
    granted: AtomicBool,
    events: Option<EventBus>,
}

impl SellerGate {
    pub fn new(credentials: Option<SellerCredentials>) -> Self {
        Self {
            credentials,
            granted: AtomicBool::new(false),
            events: None,
        }
    }

    /// Publish a [`StoreEvent::Session`] for every session change it watches
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Check seller credentials for a signed-in user
    pub fn authorize(
        &self,
        user: Option<&User>,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let Some(user) = user else {
            return Err(AuthError::NotSignedIn);
        };

        match &self.credentials {
            None => {
                tracing::warn!(
                    user_id = %user.id,
                    "no seller credentials configured, granting seller access"
                );
            }
            Some(expected) if expected.email == email.trim() && expected.password == password => {
                tracing::info!(user_id = %user.id, "seller access granted");
            }
            Some(_) => {
                tracing::debug!(user_id = %user.id, "seller credentials rejected");
                return Err(AuthError::InvalidCredentials);
            }
        }

        self.granted.store(true, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_authorized(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    /// Fail with `SellerAccessDenied` unless access was granted
    pub fn require(&self) -> Result<(), AuthError> {
        if self.is_authorized() {
            Ok(())
        } else {
            Err(AuthError::SellerAccessDenied)
        }
    }

    pub fn revoke(&self) {
        if self.granted.swap(false, Ordering::SeqCst) {
            tracing::debug!("seller access revoked");
        }
    }

    /// Apply a session change: signing out revokes access
    pub fn observe(&self, session: Option<&User>) {
        if session.is_none() {
            self.revoke();
        }
    }

    /// Keep the gate in step with a provider's session until it goes away
    pub fn watch_session(
        self: Arc<Self>,
        mut session: watch::Receiver<Option<User>>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while session.changed().await.is_ok() {
                let current = session.borrow_and_update().clone();
                self.observe(current.as_ref());
                if let Some(bus) = &self.events {
                    bus.publish(StoreEvent::Session {
                        user_id: current.map(|user| user.id),
                    });
                }
            }
        })
    }
}
