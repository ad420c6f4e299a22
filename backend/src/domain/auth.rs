//! Authentication primitives: session actors, identity tokens, and the
//! email allow-list applied at sign-in.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{Email, Role, UserId};

/// Caller resolved by the access gate before any store is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    /// Build an actor from its session components.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Error returned when a sign-in token is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyTokenError;

impl fmt::Display for EmptyTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("token must not be empty")
    }
}

impl std::error::Error for EmptyTokenError {}

/// Bearer token issued by the external identity provider.
///
/// The secret is wiped from memory on drop and never printed.
///
/// # Examples
/// ```
/// use dispatch_board::domain::IdentityToken;
///
/// let token = IdentityToken::new(" abc ").expect("non-empty");
/// assert_eq!(token.expose(), "abc");
/// assert!(IdentityToken::new("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityToken(Zeroizing<String>);

impl IdentityToken {
    /// Trim and validate a raw token.
    pub fn new(raw: &str) -> Result<Self, EmptyTokenError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyTokenError);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Secret value for handing to the identity provider.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityToken(**redacted**)")
    }
}

/// Profile claims asserted by the identity provider for a token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityClaims {
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
}

/// Email addresses permitted to sign in.
///
/// An empty list admits nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(HashSet<String>);

impl AllowList {
    /// Parse a comma-separated list, trimming each entry and dropping blanks.
    ///
    /// # Examples
    /// ```
    /// use dispatch_board::domain::{AllowList, Email};
    ///
    /// let list = AllowList::from_csv("ops@example.com, lead@example.com,");
    /// let email = Email::new("lead@example.com").expect("valid email");
    /// assert!(list.permits(&email));
    /// ```
    #[must_use]
    pub fn from_csv(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Whether `email` may sign in.
    #[must_use]
    pub fn permits(&self, email: &Email) -> bool {
        self.0.contains(email.as_str())
    }

    /// Number of configured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entries are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for AllowList {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn email(raw: &str) -> Email {
        Email::new(raw).expect("valid email")
    }

    #[rstest]
    fn allow_list_trims_entries() {
        let list = AllowList::from_csv(" a@example.com ,b@example.com");
        assert_eq!(list.len(), 2);
        assert!(list.permits(&email("a@example.com")));
        assert!(list.permits(&email("b@example.com")));
    }

    #[rstest]
    fn allow_list_comparison_is_exact() {
        let list = AllowList::from_csv("ops@example.com");
        assert!(!list.permits(&email("OPS@example.com")));
    }

    #[rstest]
    fn empty_allow_list_admits_nobody() {
        let list = AllowList::from_csv(" , ");
        assert!(list.is_empty());
        assert!(!list.permits(&email("ops@example.com")));
    }

    #[rstest]
    fn token_debug_output_is_redacted() {
        let token = IdentityToken::new("secret-value").expect("token");
        assert!(!format!("{token:?}").contains("secret-value"));
    }
}
