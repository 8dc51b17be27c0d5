use std::collections::HashSet;

use crate::config::DEFAULT_ADMIN_EMAILS;

/// The set of privileged registrants. Injected from configuration so the
/// policy can change without touching code; membership is an exact,
/// case-sensitive email match.
#[derive(Debug, Clone)]
pub struct AdminPolicy {
    emails: HashSet<String>,
}

impl AdminPolicy {
    pub fn new(emails: impl IntoIterator<Item = String>) -> Self {
        Self {
            emails: emails.into_iter().collect(),
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        self.emails.contains(email)
    }
}

impl Default for AdminPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_EMAILS.iter().map(|s| s.to_string()))
    }
}
