//! End-to-end tests for the authentication and session lifecycle

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sqlx::PgPool;
    use tower::ServiceExt;
    use uuid::Uuid;

    use stronghold_server::app;
    use stronghold_server::auth::{AuthError, AuthService, SigningKey, TokenSigner};
    use stronghold_server::state::AppState;

    /// Helper to create a migrated test database pool
    async fn setup_test_db() -> PgPool {
        let database_url = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/stronghold_test".to_string());

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn test_state(pool: PgPool) -> AppState {
        let signer = TokenSigner::new(&SigningKey::from_config(Some("test-secret")), 3600);
        let auth_service = Arc::new(AuthService::new(pool.clone(), signer, 7));
        AppState::new(pool, auth_service)
    }

    /// Unique username per test run to keep tests independent
    fn unique_username(prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_login_issues_valid_tokens() {
        let pool = setup_test_db().await;
        let state = test_state(pool.clone());

        let username = unique_username("alice");
        let user = state
            .auth_service
            .register(&username, "alice-password")
            .await
            .unwrap();

        let tokens = state
            .auth_service
            .login(&username, "alice-password")
            .await
            .unwrap();

        // Access token verifies and carries the username as subject
        let claims = state
            .auth_service
            .signer()
            .decode(&tokens.access_token)
            .unwrap();
        assert_eq!(claims.sub, username);

        // Refresh token is persisted and owned by the user
        let (owner,): (Uuid,) =
            sqlx::query_as("SELECT user_id FROM refresh_tokens WHERE token = $1")
                .bind(&tokens.refresh_token)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(owner, user.id);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_login_with_wrong_password_fails() {
        let pool = setup_test_db().await;
        let state = test_state(pool);

        let username = unique_username("mallory");
        state
            .auth_service
            .register(&username, "real-password")
            .await
            .unwrap();

        let err = state
            .auth_service
            .login(&username, "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = state
            .auth_service
            .login("no-such-user", "whatever")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_second_login_invalidates_first_refresh_token() {
        let pool = setup_test_db().await;
        let state = test_state(pool);

        let username = unique_username("alice");
        state
            .auth_service
            .register(&username, "alice-password")
            .await
            .unwrap();

        let first = state
            .auth_service
            .login(&username, "alice-password")
            .await
            .unwrap();
        let second = state
            .auth_service
            .login(&username, "alice-password")
            .await
            .unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);

        // The superseded token is gone
        let err = state
            .auth_service
            .refresh(&first.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));

        // The current one still works
        assert!(state.auth_service.refresh(&second.refresh_token).await.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_expired_refresh_token_is_deleted_on_exchange() {
        let pool = setup_test_db().await;
        let state = test_state(pool.clone());

        let username = unique_username("eve");
        let user = state
            .auth_service
            .register(&username, "eve-password")
            .await
            .unwrap();
        let tokens = state
            .auth_service
            .login(&username, "eve-password")
            .await
            .unwrap();

        // Force the refresh token past its expiry
        sqlx::query("UPDATE refresh_tokens SET expires_at = NOW() - INTERVAL '1 day' WHERE user_id = $1")
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();

        let err = state
            .auth_service
            .refresh(&tokens.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::RefreshTokenExpired));

        // Cleanup-on-read: a retry with the same string is now unknown
        let err = state
            .auth_service
            .refresh(&tokens.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_logout_revokes_refresh_tokens() {
        let pool = setup_test_db().await;
        let state = test_state(pool);

        let username = unique_username("bob");
        let user = state
            .auth_service
            .register(&username, "bob-password")
            .await
            .unwrap();
        let tokens = state
            .auth_service
            .login(&username, "bob-password")
            .await
            .unwrap();

        state.auth_service.logout(user.id).await.unwrap();

        let err = state
            .auth_service
            .refresh(&tokens.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));

        // Logout is idempotent
        assert!(state.auth_service.logout(user.id).await.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_gated_route_with_valid_cookie() {
        let pool = setup_test_db().await;
        let state = test_state(pool);

        let username = unique_username("dave");
        state
            .auth_service
            .register(&username, "dave-password")
            .await
            .unwrap();
        let tokens = state
            .auth_service
            .login(&username, "dave-password")
            .await
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/auth/me")
                    .header("cookie", format!("access_token={}", tokens.access_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_valid_token_for_deleted_user_is_rejected() {
        let pool = setup_test_db().await;
        let state = test_state(pool.clone());

        let username = unique_username("carol");
        let user = state
            .auth_service
            .register(&username, "carol-password")
            .await
            .unwrap();
        let tokens = state
            .auth_service
            .login(&username, "carol-password")
            .await
            .unwrap();

        // Delete the user out from under a still-valid access token
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/auth/me")
                    .header("cookie", format!("access_token={}", tokens.access_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_duplicate_registration_conflicts() {
        let pool = setup_test_db().await;
        let state = test_state(pool);

        let username = unique_username("frank");
        state
            .auth_service
            .register(&username, "frank-password")
            .await
            .unwrap();

        let err = state
            .auth_service
            .register(&username, "other-password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }
}
