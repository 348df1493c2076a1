//! Normalized route paths.

use std::fmt;

use crate::table::RouteTableError;

/// A normalized, literal route path like `/orders`.
///
/// Requested locations are normalized before they are compared against declared paths:
/// - the query (`?page=2`) and any nested fragment (`#top`) are dropped,
/// - percent-encoding is decoded,
/// - a missing leading `/` is added,
/// - trailing `/`s are removed, except for the index path `/`.
///
/// Matching a location against a declared path ignores case, so `/ORDERS` lands on `/orders`.
/// The path itself keeps the case it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutePath(String);

impl RoutePath {
    /// Parse a path declared in a route table.
    ///
    /// Declared paths must start with `/` and may not carry a query or fragment.
    ///
    /// ```rust
    /// # use delivery_router::RoutePath;
    /// assert_eq!(RoutePath::declare("/orders/").unwrap().as_str(), "/orders");
    /// assert!(RoutePath::declare("orders").is_err());
    /// ```
    pub fn declare(path: &str) -> Result<Self, RouteTableError> {
        if !path.starts_with('/') || path.contains(|c: char| c == '?' || c == '#') {
            return Err(RouteTableError::InvalidPath {
                path: path.to_string(),
            });
        }

        Ok(Self::normalize(path))
    }

    /// Normalize a requested location, like the route read from a fragment identifier.
    ///
    /// ```rust
    /// # use delivery_router::RoutePath;
    /// assert_eq!(RoutePath::normalize("/orders/?page=2").as_str(), "/orders");
    /// assert_eq!(RoutePath::normalize("").as_str(), "/");
    /// ```
    pub fn normalize(location: &str) -> Self {
        let path = location
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();

        let decoded = urlencoding::decode(path)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| path.to_string());

        let trimmed = decoded.trim_matches('/');
        match trimmed.is_empty() {
            true => Self("/".to_string()),
            false => Self(format!("/{trimmed}")),
        }
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a requested location normalized to `other` lands on this path.
    ///
    /// ```rust
    /// # use delivery_router::RoutePath;
    /// let orders = RoutePath::normalize("/orders");
    /// assert!(orders.matches(&RoutePath::normalize("/Orders/")));
    /// assert!(!orders.matches(&RoutePath::normalize("/order")));
    /// ```
    pub fn matches(&self, other: &RoutePath) -> bool {
        self.match_key() == other.match_key()
    }

    pub(crate) fn match_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for RoutePath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RoutePath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
