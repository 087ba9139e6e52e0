//! Mock login gate.
//!
//! There is no account backend: credentials are checked for shape and then
//! compared against a single demo account. A successful login is remembered
//! in `session.json` in the data directory until `logout`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::util::{atomic_write, remove_if_exists};

/// Session state filename.
pub const SESSION_FILENAME: &str = "session.json";

/// Email of the demo account.
pub const DEMO_EMAIL: &str = "username@gmail.com";

/// Password of the demo account.
pub const DEMO_PASSWORD: &str = "Password123!";

/// Characters accepted as the required special character.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Email and password as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Bundle an email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check both fields, reporting every failing field.
    pub fn validate(&self) -> Result<()> {
        let email = validate_email(&self.email).err();
        let password = validate_password(&self.password).err();
        if email.is_none() && password.is_none() {
            Ok(())
        } else {
            Err(CatalogError::CredentialValidation { email, password })
        }
    }
}

/// Check an email address. The error is the message to show the user.
pub fn validate_email(email: &str) -> std::result::Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

/// Check a password. The first failing rule is reported.
pub fn validate_password(password: &str) -> std::result::Result<(), String> {
    let rules: [(fn(&str) -> bool, &str); 6] = [
        (|p| !p.is_empty(), "Password is required"),
        (
            |p| p.chars().count() >= 8,
            "Password must be at least 8 characters",
        ),
        (
            |p| p.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter",
        ),
        (
            |p| p.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter",
        ),
        (
            |p| p.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one number",
        ),
        (
            |p| p.chars().any(|c| PASSWORD_SPECIALS.contains(c)),
            "Password must contain at least one special character (!@#$%^&*)",
        ),
    ];

    match rules.iter().find(|(passes, _)| !passes(password)) {
        Some((_, message)) => Err((*message).to_string()),
        None => Ok(()),
    }
}

/// Persisted login state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Always true for a stored session.
    pub logged_in: bool,
    /// Account email.
    pub email: String,
    /// Login time.
    pub since: DateTime<Utc>,
}

impl Session {
    /// Time since login.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.since)
    }
}

/// Login gate backed by a session file.
#[derive(Debug, Clone)]
pub struct AuthGate {
    path: PathBuf,
    required: bool,
}

impl AuthGate {
    /// Gate storing its session at `path`.
    pub fn new(path: impl Into<PathBuf>, required: bool) -> Self {
        Self {
            path: path.into(),
            required,
        }
    }

    /// Gate storing `session.json` inside a data directory.
    pub fn in_dir(data_dir: &Path, required: bool) -> Self {
        Self::new(data_dir.join(SESSION_FILENAME), required)
    }

    /// Session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether browsing requires a login.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Validate, check against the demo account and persist a session.
    pub fn login(&self, credentials: &Credentials) -> Result<Session> {
        credentials.validate()?;

        if credentials.email != DEMO_EMAIL || credentials.password != DEMO_PASSWORD {
            warn!(email = %credentials.email, "Rejected login");
            return Err(CatalogError::InvalidCredentials);
        }

        let session = Session {
            logged_in: true,
            email: credentials.email.clone(),
            since: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&session)?;
        atomic_write(&self.path, content.as_bytes())?;

        info!(email = %session.email, "Logged in");
        Ok(session)
    }

    /// Forget the stored session. Logging out twice is fine.
    pub fn logout(&self) -> Result<()> {
        remove_if_exists(&self.path)?;
        info!("Logged out");
        Ok(())
    }

    /// Stored session, if any.
    ///
    /// An unreadable or malformed file counts as logged out.
    pub fn current(&self) -> Option<Session> {
        if !self.path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read session file");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&content) {
            Ok(session) if session.logged_in => Some(session),
            Ok(_) => {
                debug!(path = %self.path.display(), "Session file marks user as logged out");
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed session file");
                None
            }
        }
    }

    /// Fail unless logged in or the gate is disabled.
    pub fn require(&self) -> Result<()> {
        if !self.required || self.current().is_some() {
            Ok(())
        } else {
            Err(CatalogError::NotAuthenticated)
        }
    }
}
