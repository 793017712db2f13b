//! Authentication primitives: validated credentials for login and signup.
//!
//! Passwords are wrapped in [`zeroize::Zeroizing`] so plaintext copies are
//! wiped when the request-scoped value is dropped. Hashing itself lives in
//! the inbound adapter; the domain only carries validated inputs.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserName, UserValidationError};

/// Minimum accepted password length at registration.
const PASSWORD_MIN: usize = 8;

/// Validation errors for authentication payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Email was missing or malformed.
    InvalidEmail,
    /// Name was missing or invalid.
    InvalidName(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password is shorter than [`PASSWORD_MIN`] characters.
    PasswordTooShort {
        /// Minimum permitted length.
        min: usize,
    },
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::InvalidName(inner) => write!(f, "{inner}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// A non-empty password kept in zeroizing storage.
///
/// Retains caller-provided whitespace to avoid surprising credential
/// comparisons.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept any non-empty password (login path).
    pub fn new(raw: impl Into<String>) -> Result<Self, AuthValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Accept a password meeting the registration length policy.
    pub fn new_for_registration(raw: impl Into<String>) -> Result<Self, AuthValidationError> {
        let password = Self::new(raw)?;
        if password.expose().chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(password)
    }

    /// Borrow the plaintext for hashing or verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Validated login payload.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::new(email).map_err(|_| AuthValidationError::InvalidEmail)?;
        let password = Password::new(password)?;
        Ok(Self { email, password })
    }

    /// Email used for the user lookup.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password to verify against the stored hash.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated registration payload.
#[derive(Debug, Clone)]
pub struct RegisterDetails {
    name: UserName,
    email: EmailAddress,
    password: Password,
}

impl RegisterDetails {
    /// Construct registration details from raw inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let name = UserName::new(name).map_err(AuthValidationError::InvalidName)?;
        let email = EmailAddress::new(email).map_err(|_| AuthValidationError::InvalidEmail)?;
        let password = Password::new_for_registration(password)?;
        Ok(Self {
            name,
            email,
            password,
        })
    }

    /// Display name for the new account.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Login email for the new account.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password to hash before persisting.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}
