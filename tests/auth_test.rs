mod common;

use std::sync::Arc;

use vistara::{
    auth::{AuthService, JwtService},
    domain::{LoginRequest, RegisterRequest, UpdateUserRequest, ROLE_ADMIN, ROLE_USER},
    error::AppError,
    repository::{SqliteTokenRepository, SqliteUserRepository, TokenRepository, UserRepository},
    service::UserService,
};

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Tara Menon".to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
        phone: None,
    }
}

#[tokio::test]
async fn test_register_login_and_authenticate() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let tokens = Arc::new(SqliteTokenRepository::new(pool.clone()));
    let auth = AuthService::new(users.clone(), tokens.clone(), JwtService::new("secret", 48));

    let registered = auth.register(register_request("tara@example.com")).await?;
    assert!(auth.jwt().is_valid(&registered.token, "tara@example.com"));

    let user = auth.authenticate(&registered.token).await?;
    assert_eq!(user.email, "tara@example.com");
    assert!(user.enabled);
    assert!(!user.account_locked);
    assert!(user.has_role(ROLE_USER));

    let logged_in = auth.login(LoginRequest {
        email: "tara@example.com".to_string(),
        password: "correct horse".to_string(),
    }).await?;
    assert_eq!(auth.jwt().extract_subject(&logged_in.token)?, "tara@example.com");

    assert_eq!(tokens.find_by_user(user.id).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let auth = AuthService::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteTokenRepository::new(pool.clone())),
        JwtService::new("secret", 48),
    );

    auth.register(register_request("tara@example.com")).await?;

    let wrong_password = auth.login(LoginRequest {
        email: "tara@example.com".to_string(),
        password: "battery staple".to_string(),
    }).await;
    assert!(matches!(wrong_password, Err(AppError::Unauthorized)));

    let unknown = auth.login(LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "correct horse".to_string(),
    }).await;
    assert!(matches!(unknown, Err(AppError::Unauthorized)));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_conflicts() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let auth = AuthService::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteTokenRepository::new(pool.clone())),
        JwtService::new("secret", 48),
    );

    auth.register(register_request("tara@example.com")).await?;
    let again = auth.register(register_request("tara@example.com")).await;

    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

#[tokio::test]
async fn test_token_for_other_secret_is_rejected() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let auth = AuthService::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteTokenRepository::new(pool.clone())),
        JwtService::new("secret", 48),
    );

    auth.register(register_request("tara@example.com")).await?;
    let forged = JwtService::new("another-secret", 48).issue("tara@example.com")?;

    assert!(matches!(auth.authenticate(&forged).await, Err(AppError::Unauthorized)));

    Ok(())
}

#[tokio::test]
async fn test_user_update_rehashes_password() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let auth = AuthService::new(
        users.clone(),
        Arc::new(SqliteTokenRepository::new(pool.clone())),
        JwtService::new("secret", 48),
    );
    let user_service = UserService::new(users.clone());

    auth.register(register_request("tara@example.com")).await?;
    let user = users.find_by_email("tara@example.com").await?.expect("user exists");

    let updated = user_service.update(&user, user.id, UpdateUserRequest {
        phone: Some("+91 99000 11111".to_string()),
        password: Some("a much longer secret".to_string()),
        ..Default::default()
    }).await?;
    assert_eq!(updated.name, "Tara Menon");
    assert_eq!(updated.phone.as_deref(), Some("+91 99000 11111"));

    let hash = users.find_password_hash("tara@example.com").await?.expect("hash stored");
    assert!(AuthService::verify_password("a much longer secret", &hash).await?);

    user_service.delete(&user, user.id).await?;
    assert!(matches!(user_service.get(user.id).await, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_users_cannot_modify_other_accounts() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let auth = AuthService::new(
        users.clone(),
        Arc::new(SqliteTokenRepository::new(pool.clone())),
        JwtService::new("secret", 48),
    );
    let user_service = UserService::new(users.clone());

    auth.register(register_request("admin@example.com")).await?;
    auth.register(register_request("member@example.com")).await?;
    let admin = users.find_by_email("admin@example.com").await?.expect("admin exists");
    users.add_role(admin.id, ROLE_ADMIN).await?;
    let admin = users.find_by_id(admin.id).await?.expect("admin exists");
    let member = users.find_by_email("member@example.com").await?.expect("member exists");

    let takeover = user_service.update(&member, admin.id, UpdateUserRequest {
        password: Some("new password 123".to_string()),
        ..Default::default()
    }).await;
    assert!(matches!(takeover, Err(AppError::Forbidden)));
    assert!(matches!(user_service.delete(&member, admin.id).await, Err(AppError::Forbidden)));

    let admin_login = auth.login(LoginRequest {
        email: "admin@example.com".to_string(),
        password: "new password 123".to_string(),
    }).await;
    assert!(matches!(admin_login, Err(AppError::Unauthorized)));

    let renamed = user_service.update(&admin, member.id, UpdateUserRequest {
        name: Some("Renamed by admin".to_string()),
        ..Default::default()
    }).await?;
    assert_eq!(renamed.name, "Renamed by admin");

    user_service.delete(&admin, member.id).await?;
    assert!(users.find_by_id(member.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_locked_or_disabled_accounts_cannot_sign_in() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let auth = AuthService::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteTokenRepository::new(pool.clone())),
        JwtService::new("secret", 48),
    );

    let locked_token = auth.register(register_request("locked@example.com")).await?.token;
    let disabled_token = auth.register(register_request("disabled@example.com")).await?.token;

    sqlx::query("UPDATE users SET account_locked = 1 WHERE email = ?")
        .bind("locked@example.com")
        .execute(&pool)
        .await?;
    sqlx::query("UPDATE users SET enabled = 0 WHERE email = ?")
        .bind("disabled@example.com")
        .execute(&pool)
        .await?;

    for (email, token) in [
        ("locked@example.com", &locked_token),
        ("disabled@example.com", &disabled_token),
    ] {
        let login = auth.login(LoginRequest {
            email: email.to_string(),
            password: "correct horse".to_string(),
        }).await;
        assert!(matches!(login, Err(AppError::Unauthorized)), "login allowed for {}", email);

        assert!(
            matches!(auth.authenticate(token).await, Err(AppError::Unauthorized)),
            "token accepted for {}",
            email
        );
    }

    Ok(())
}
