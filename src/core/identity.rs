//! Email/password identity provider.
//!
//! Accounts live in Postgres, sessions and confirmation tokens in Redis.
//! Sign-in and sign-out are broadcast to listeners registered with
//! [`AuthEvents::on_change`].

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError, Weak,
};

use chrono::Local;
use redis::ConnectionLike;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        error::{AppError, AppResult},
        security::{
            generate_refresh_token_from_account, generate_token_from_account,
            get_account_from_refresh_token, hash_password, verify_hash_password,
        },
        session::{
            add_confirmation, add_session, remove_session, take_confirmation, take_refresh,
        },
    },
    model::user::Account,
    repository::{
        profile::create_profile,
        user::{confirm_account_email, create_account, get_account_by_email},
    },
    settings::Config,
};

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn { account_id: Uuid },
    SignedOut { account_id: Uuid },
}

type Listener = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener)>>,
}

impl Listeners {
    // Listeners are never called under the lock, so a poisoned list is
    // still consistent.
    fn entries(&self) -> MutexGuard<'_, Vec<(u64, Listener)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registry of auth-change listeners.
#[derive(Clone, Default)]
pub struct AuthEvents {
    inner: Arc<Listeners>,
}

/// Keeps a listener registered until it is unsubscribed or dropped.
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.entries().push((id, Arc::new(callback)));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.inner),
        }
    }

    /// Listeners run outside the lock and may subscribe or unsubscribe
    /// from inside their callback.
    pub fn emit(&self, event: &AuthEvent) {
        let listeners: Vec<Listener> = self
            .inner
            .entries()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.entries().len()
    }
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        listeners.entries().retain(|(id, _)| *id != self.id);
    }
}

pub struct SignInOutcome {
    pub account: Account,
    pub token: String,
    pub refresh_token: String,
}

/// Loose `local@domain.tld` shape check.
pub fn validate_email(email: &str) -> AppResult<()> {
    let invalid = || AppError::Auth("Unable to validate email address: invalid format".to_string());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
        || !domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
    {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Auth(format!(
            "Password should be at least {} characters.",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Registers an account and its empty profile. The account stays
/// unconfirmed unless `auto_confirm_email` is set; no session is created.
pub async fn sign_up(
    tx: &mut Transaction<'_, Postgres>,
    config: &Config,
    email: &str,
    password: &str,
    display_name: &str,
) -> AppResult<Account> {
    let email = email.trim().to_lowercase();
    validate_email(&email)?;
    validate_password(password)?;
    if get_account_by_email(tx, &email).await?.is_some() {
        return Err(AppError::Auth("User already registered".to_string()));
    }

    let hashed_password =
        hash_password(password).map_err(|err| AppError::Internal(anyhow::anyhow!(err)))?;
    let now = Local::now().fixed_offset();
    let display_name = display_name.trim();
    let account = Account {
        id: Uuid::now_v7(),
        email,
        password: hashed_password,
        display_name: (!display_name.is_empty()).then(|| display_name.to_string()),
        email_confirmed_date: config.auto_confirm_email.then_some(now),
        created_date: now,
        updated_date: now,
    };
    create_account(tx, &account).await?;
    create_profile(tx, &account.id, display_name, &now).await?;
    Ok(account)
}

/// Stores a confirmation token for an account committed by [`sign_up`].
/// `None` when the account is already confirmed.
pub fn issue_confirmation<C: ConnectionLike>(
    redis_conn: &mut C,
    config: &Config,
    account: &Account,
) -> AppResult<Option<String>> {
    if account.is_confirmed() {
        return Ok(None);
    }
    Ok(Some(add_confirmation(redis_conn, &account.id, config)?))
}

pub async fn confirm_email<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    token: &str,
) -> AppResult<Uuid> {
    let Some(account_id) = take_confirmation(redis_conn, token)? else {
        return Err(AppError::Auth(
            "Email link is invalid or has expired".to_string(),
        ));
    };
    let now = Local::now().fixed_offset();
    if !confirm_account_email(tx, &account_id, &now).await? {
        return Err(AppError::NotFound(format!(
            "account with id = {} not found",
            account_id
        )));
    }
    Ok(account_id)
}

pub async fn sign_in<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    config: &Config,
    events: &AuthEvents,
    email: &str,
    password: &str,
) -> AppResult<SignInOutcome> {
    let invalid = || AppError::Auth("Invalid login credentials".to_string());
    let account = get_account_by_email(tx, email.trim())
        .await?
        .ok_or_else(invalid)?;
    let is_valid = verify_hash_password(password, &account.password)
        .map_err(|err| AppError::Internal(anyhow::anyhow!(err)))?;
    if !is_valid {
        return Err(invalid());
    }
    if !account.is_confirmed() {
        return Err(AppError::Auth("Email not confirmed".to_string()));
    }

    let outcome = start_session(redis_conn, config, account)?;
    events.emit(&AuthEvent::SignedIn {
        account_id: outcome.account.id,
    });
    Ok(outcome)
}

/// Issues an access/refresh token pair and stores the session.
pub fn start_session<C: ConnectionLike>(
    redis_conn: &mut C,
    config: &Config,
    account: Account,
) -> AppResult<SignInOutcome> {
    let token = generate_token_from_account(&account, config)?;
    let refresh_token = generate_refresh_token_from_account(&account, config)?;
    add_session(redis_conn, &account, config, &token, &refresh_token)?;
    Ok(SignInOutcome {
        account,
        token,
        refresh_token,
    })
}

/// Trades a refresh token of a live session for a new token pair. The old
/// session is revoked. `None` when the token is invalid, already used or
/// signed out, or the account is unconfirmed.
pub async fn refresh<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    config: &Config,
    events: &AuthEvents,
    refresh_token: &str,
) -> AppResult<Option<SignInOutcome>> {
    let Some(account) = get_account_from_refresh_token(tx, refresh_token, config).await? else {
        return Ok(None);
    };
    let Some(token) = take_refresh(redis_conn, refresh_token)? else {
        return Ok(None);
    };
    remove_session(redis_conn, &token)?;
    if !account.is_confirmed() {
        return Ok(None);
    }

    let outcome = start_session(redis_conn, config, account)?;
    events.emit(&AuthEvent::SignedIn {
        account_id: outcome.account.id,
    });
    Ok(Some(outcome))
}

/// Returns false when the token had no live session.
pub fn sign_out<C: ConnectionLike>(
    redis_conn: &mut C,
    events: &AuthEvents,
    token: &str,
) -> AppResult<bool> {
    let Some(session) = remove_session(redis_conn, token)? else {
        return Ok(false);
    };
    if let Ok(account_id) = Uuid::parse_str(&session.account_id) {
        events.emit(&AuthEvent::SignedOut { account_id });
    }
    Ok(true)
}
