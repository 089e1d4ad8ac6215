//! Property-based tests for session tokens

use std::time::Duration;

use journal_api::backend::auth::sessions::{Claims, TokenError, TokenIssuer};
use proptest::prelude::*;

fn issuer(secret: &str) -> TokenIssuer {
    TokenIssuer::new(secret, Duration::from_secs(3600)).unwrap()
}

proptest! {
    #[test]
    fn issued_tokens_carry_their_subject(user_id in 1i64..i64::MAX, username in "[a-zA-Z0-9_]{1,32}") {
        let tokens = issuer("property-secret");
        let claims = tokens.verify(&tokens.issue(user_id, &username).unwrap()).unwrap();

        prop_assert_eq!(claims.user_id, user_id);
        prop_assert_eq!(claims.username, username);
        prop_assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn past_expiry_never_verifies(age in 1u64..1_000_000) {
        let tokens = issuer("property-secret");
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            user_id: 1,
            username: "ada".to_string(),
            iat: now - age - 60,
            exp: now - age,
        };

        prop_assert_eq!(tokens.verify(&tokens.sign(&claims).unwrap()), Err(TokenError::Expired));
    }

    #[test]
    fn other_secrets_never_verify(secret in "[a-z]{8,24}") {
        prop_assume!(secret != "property-secret");
        let token = issuer("property-secret").issue(7, "ada").unwrap();

        prop_assert_eq!(issuer(&secret).verify(&token), Err(TokenError::Invalid));
    }
}
