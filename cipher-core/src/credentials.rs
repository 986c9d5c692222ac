use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Failed login attempts that trigger a permanent block.
const MAX_LOGIN_ATTEMPTS: u8 = 3;

/// The fixed set of characters that satisfy the "special character"
/// password requirement.
const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Errors returned by registration and authentication.
///
/// `Display` strings are the user-facing messages; the presentation layer is
/// expected to surface them verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The username failed the length or character-set rule.
    #[error("Username must be at least 6 characters and contain only letters and numbers")]
    InvalidUsername,
    /// The password missed one or more of the five requirements.
    #[error("Password does not meet requirements")]
    InvalidPassword {
        /// Labels of the unmet requirements, in checklist order.
        unmet: Vec<&'static str>,
    },
    /// A record already exists for the username.
    #[error("Username already exists")]
    DuplicateUsername,
    /// Unknown username or wrong password. The message is identical in both
    /// cases so callers cannot learn which usernames exist.
    #[error("Invalid username or password")]
    InvalidCredentials {
        /// Remaining attempts before lockout. Absent when the username has
        /// no record.
        attempts_left: Option<u8>,
    },
    /// The account is blocked; the password is not checked.
    #[error("Account is blocked due to too many failed login attempts")]
    Blocked,
}

/// Per-requirement breakdown of a password validation.
///
/// Exposed separately from [`CredentialStore::register`] so a front end can
/// render a live requirement checklist while the user types.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCheck {
    /// At least 8 characters.
    pub length: bool,
    /// Contains an uppercase letter.
    pub uppercase: bool,
    /// Contains a lowercase letter.
    pub lowercase: bool,
    /// Contains a digit.
    pub number: bool,
    /// Contains a character from the special set.
    pub special: bool,
}

impl PasswordCheck {
    /// Whether all five requirements are met.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.length && self.uppercase && self.lowercase && self.number && self.special
    }

    /// Human-readable labels of the unmet requirements.
    #[must_use]
    pub fn unmet(&self) -> Vec<&'static str> {
        let checklist = [
            (self.length, "At least 8 characters"),
            (self.uppercase, "One uppercase letter"),
            (self.lowercase, "One lowercase letter"),
            (self.number, "One number"),
            (self.special, "One special character"),
        ];
        checklist
            .into_iter()
            .filter_map(|(met, label)| (!met).then_some(label))
            .collect()
    }
}

/// A registered user. Created on successful registration, never deleted,
/// and mutated only by authentication attempts.
#[derive(Debug, Clone)]
pub struct UserRecord {
    password: String,
    login_attempts: u8,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    /// When the record was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Process-wide credential state: user records, the blocked set, and the
/// active session.
///
/// State lives in memory for the lifetime of the owning process; there is no
/// persistence. The mutating operations take `&mut self`, so in a
/// single-threaded host each call is naturally atomic; a multi-threaded host
/// must wrap the store in a lock.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<String, UserRecord>,
    blocked: HashSet<String>,
    current_user: Option<String>,
}

impl CredentialStore {
    /// Creates an empty store: no users, no blocked accounts, no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new user.
    ///
    /// The username must be at least 6 characters of ASCII letters and
    /// digits (case-sensitive, unique); the password must satisfy all five
    /// requirements of [`validate_password`]. The secret is stored as given;
    /// this is a demonstration tool and deliberately does not hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidUsername`], [`AuthError::DuplicateUsername`],
    /// or [`AuthError::InvalidPassword`] with the unmet requirements. Nothing
    /// is stored on any failure path.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        debug!("attempting to register user '{username}'");
        if !is_valid_username(username) {
            return Err(AuthError::InvalidUsername);
        }
        if self.users.contains_key(username) {
            return Err(AuthError::DuplicateUsername);
        }
        let check = validate_password(password);
        if !check.is_valid() {
            return Err(AuthError::InvalidPassword {
                unmet: check.unmet(),
            });
        }

        self.users.insert(
            username.to_owned(),
            UserRecord {
                password: password.to_owned(),
                login_attempts: 0,
                created_at: Utc::now(),
            },
        );
        info!("registered user '{username}'");
        Ok(())
    }

    /// Authenticates a user and, on success, makes them the active session.
    ///
    /// The blocked-set check runs first and short-circuits everything else.
    /// A correct password resets the failed-attempt counter; a wrong one
    /// increments it, and the third cumulative failure blocks the account
    /// permanently within the same call.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Blocked`] for a blocked account (whether the
    /// block predates this call or was triggered by it), or
    /// [`AuthError::InvalidCredentials`] for an unknown username or a wrong
    /// password. The two credential failures share one message; only the
    /// wrong-password case carries `attempts_left`.
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        debug!("attempting to log in user '{username}'");
        if self.blocked.contains(username) {
            return Err(AuthError::Blocked);
        }

        let Some(user) = self.users.get_mut(username) else {
            return Err(AuthError::InvalidCredentials {
                attempts_left: None,
            });
        };

        if user.password == password {
            user.login_attempts = 0;
            self.current_user = Some(username.to_owned());
            info!("login successful for '{username}'");
            return Ok(());
        }

        user.login_attempts += 1;
        if user.login_attempts >= MAX_LOGIN_ATTEMPTS {
            self.blocked.insert(username.to_owned());
            warn!("user '{username}' blocked after {MAX_LOGIN_ATTEMPTS} failed attempts");
            return Err(AuthError::Blocked);
        }
        Err(AuthError::InvalidCredentials {
            attempts_left: Some(MAX_LOGIN_ATTEMPTS - user.login_attempts),
        })
    }

    /// Clears the active session. Safe to call when nobody is logged in;
    /// counters and the blocked set are untouched.
    pub fn logout(&mut self) {
        self.current_user = None;
    }

    /// The username of the active session, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Whether a session is active.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Whether the username is permanently blocked.
    #[must_use]
    pub fn is_blocked(&self, username: &str) -> bool {
        self.blocked.contains(username)
    }

    /// Number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Looks up a user record by exact username.
    #[must_use]
    pub fn user(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }
}

/// Checks the username rule: at least 6 characters, ASCII letters and
/// digits only.
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    username.len() >= 6 && username.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Evaluates the five password requirements independently.
#[must_use]
pub fn validate_password(password: &str) -> PasswordCheck {
    PasswordCheck {
        length: password.len() >= 8,
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        number: password.chars().any(|c| c.is_ascii_digit()),
        special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
    }
}

/// Result payload handed to the presentation layer.
///
/// Mirrors the `{success, message, attemptsLeft?, blocked?}` shape a front
/// end consumes; the optional fields are omitted from JSON when absent.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The user-facing message.
    pub message: String,
    /// Remaining attempts before lockout, after a failed login with a known
    /// username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_left: Option<u8>,
    /// Set when the account is blocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

impl AuthResponse {
    /// Builds the payload for a registration outcome.
    #[must_use]
    pub fn from_register(result: &Result<(), AuthError>) -> Self {
        match result {
            Ok(()) => Self::success("Registration successful"),
            Err(error) => Self::failure(error),
        }
    }

    /// Builds the payload for an authentication outcome.
    #[must_use]
    pub fn from_login(result: &Result<(), AuthError>) -> Self {
        match result {
            Ok(()) => Self::success("Login successful"),
            Err(error) => Self::failure(error),
        }
    }

    fn success(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
            attempts_left: None,
            blocked: None,
        }
    }

    fn failure(error: &AuthError) -> Self {
        let attempts_left = match error {
            AuthError::InvalidCredentials { attempts_left } => *attempts_left,
            _ => None,
        };
        Self {
            success: false,
            message: error.to_string(),
            attempts_left,
            blocked: matches!(error, AuthError::Blocked).then_some(true),
        }
    }
}
