use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Length of a session token in characters.
const TOKEN_LENGTH: usize = 64;

/// Generate a random session token for the session cookie.
pub fn generate_session_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// How long a session lives before the expiry sweep removes it.
pub enum SessionDuration {
    /// 1 hour, for plain logins
    Short,
    /// 30 days, when "remember me" is checked
    Long,
}

impl SessionDuration {
    #[must_use]
    pub const fn as_seconds(&self) -> i64 {
        match self {
            Self::Short => 3600,
            Self::Long => 30 * 24 * 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_long_and_unique() {
        let token1 = generate_session_token();
        let token2 = generate_session_token();

        assert_eq!(token1.len(), TOKEN_LENGTH);
        assert_ne!(token1, token2);
        assert!(token1.chars().all(|c| c.is_alphanumeric()));
    }

    #[test]
    fn test_remember_me_outlives_plain_login() {
        assert!(SessionDuration::Long.as_seconds() > SessionDuration::Short.as_seconds());
        assert_eq!(SessionDuration::Short.as_seconds(), 3600);
        assert_eq!(SessionDuration::Long.as_seconds(), 2_592_000);
    }
}
