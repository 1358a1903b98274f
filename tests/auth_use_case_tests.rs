use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use tokio::sync::mpsc;
use uuid::Uuid;

use showcase_api::auth::jwt::JwtService;
use showcase_api::auth::password::hash_password;
use showcase_api::entities::account::{Account, AccountInsert, LoginAccount, NewAccount};
use showcase_api::errors::{AppError, AuthError};
use showcase_api::repositories::account::AccountRepository;
use showcase_api::settings::{AppConfig, AppEnvironment};
use showcase_api::use_cases::auth::AuthHandler;
use showcase_api::use_cases::provisioning::AccountCreated;

mock! {
    pub AccountRepo {}

    #[async_trait]
    impl AccountRepository for AccountRepo {
        async fn check_connection(&self) -> Result<(), AppError>;
        async fn account_exists(&self, id: &Uuid) -> Result<bool, AppError>;
        async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;
        async fn get_account_by_id(&self, id: &Uuid) -> Result<Option<Account>, AppError>;
        async fn create_account(&self, account: &AccountInsert) -> Result<Uuid, AppError>;
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Showcase API Test".into(),
        port: 0,
        host: "127.0.0.1".into(),
        worker_count: 1,
        database_url: "postgres://localhost/test".into(),
        cors_allowed_origins: vec!["*".into()],
        jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
        jwt_expiration_minutes: 15,
        refresh_token_secret: "test_refresh_secret_that_is_long_enough_1234567890".into(),
        refresh_token_exp_days: 7,
    }
}

fn handler_with(
    repo: MockAccountRepo,
) -> (
    AuthHandler<MockAccountRepo, JwtService>,
    mpsc::Receiver<AccountCreated>,
) {
    let (tx, rx) = mpsc::channel(4);
    (AuthHandler::new(repo, JwtService::new(&test_config()), tx), rx)
}

fn stored_account(email: &str, password: &str) -> Account {
    Account {
        id: Uuid::new_v4(),
        email: email.to_string(),
        username: None,
        password_hash: hash_password(password).unwrap(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn register_creates_the_account_and_emits_the_event() {
    let account_id = Uuid::new_v4();

    let mut repo = MockAccountRepo::new();
    repo.expect_create_account()
        .withf(|insert| insert.email == "bob@example.com")
        .returning(move |_| Ok(account_id));

    let (handler, mut events) = handler_with(repo);

    let response = handler
        .register(NewAccount {
            email: "bob@example.com".into(),
            username: Some("bob123".into()),
            password: "Str0ng&Secret#2024!".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.id, account_id);

    let event = events.recv().await.expect("No account-created event emitted");
    assert_eq!(event.account_id, account_id);
    assert_eq!(event.email, "bob@example.com");
    assert_eq!(event.username.as_deref(), Some("bob123"));
}

#[tokio::test]
async fn register_conflict_emits_no_event() {
    let mut repo = MockAccountRepo::new();
    repo.expect_create_account()
        .returning(|_| Err(AppError::Conflict("Account with this email already exists".into())));

    let (handler, mut events) = handler_with(repo);

    let result = handler
        .register(NewAccount {
            email: "bob@example.com".into(),
            username: None,
            password: "Str0ng&Secret#2024!".into(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn register_rejects_a_weak_password_before_touching_the_repo() {
    // No expectations: any repository call would panic the mock.
    let (handler, _events) = handler_with(MockAccountRepo::new());

    let result = handler
        .register(NewAccount {
            email: "bob@example.com".into(),
            username: None,
            password: "password1".into(),
        })
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn login_returns_tokens_for_valid_credentials() {
    let account = stored_account("alice@example.com", "Str0ng&Secret#2024!");
    let stored = account.clone();

    let mut repo = MockAccountRepo::new();
    repo.expect_get_account_by_email()
        .returning(move |_| Ok(Some(stored.clone())));

    let (handler, _events) = handler_with(repo);

    let response = handler
        .login(LoginAccount {
            email: account.email.clone(),
            password: "Str0ng&Secret#2024!".into(),
        })
        .await
        .unwrap();

    assert!(!response.access_token.is_empty());
    assert!(!response.refresh_token.is_empty());
    assert_eq!(response.token_type, "Bearer");
}

#[tokio::test]
async fn login_rejects_a_wrong_password() {
    let account = stored_account("alice@example.com", "Str0ng&Secret#2024!");

    let mut repo = MockAccountRepo::new();
    repo.expect_get_account_by_email()
        .returning(move |_| Ok(Some(account.clone())));

    let (handler, _events) = handler_with(repo);

    let result = handler
        .login(LoginAccount {
            email: "alice@example.com".into(),
            password: "Wr0ng&Secret#2024!".into(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::WrongCredentials)));
}

#[tokio::test]
async fn login_rejects_an_unknown_email() {
    let mut repo = MockAccountRepo::new();
    repo.expect_get_account_by_email().returning(|_| Ok(None));

    let (handler, _events) = handler_with(repo);

    let result = handler
        .login(LoginAccount {
            email: "nobody@example.com".into(),
            password: "Str0ng&Secret#2024!".into(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::WrongCredentials)));
}

#[tokio::test]
async fn refresh_token_round_trips_through_the_account() {
    let account = stored_account("alice@example.com", "Str0ng&Secret#2024!");
    let account_id = account.id;
    let stored = account.clone();

    let mut repo = MockAccountRepo::new();
    repo.expect_get_account_by_id()
        .withf(move |id| *id == account_id)
        .returning(move |_| Ok(Some(stored.clone())));

    let jwt = JwtService::new(&test_config());
    let refresh_token = jwt.create_refresh_jwt(&account.id).unwrap();

    let (tx, _rx) = mpsc::channel(1);
    let handler = AuthHandler::new(repo, jwt, tx);

    let response = handler.refresh_token(&refresh_token).await.unwrap();
    assert!(!response.access_token.is_empty());
}

#[tokio::test]
async fn refresh_rejects_an_access_token() {
    let jwt = JwtService::new(&test_config());
    let account = stored_account("alice@example.com", "Str0ng&Secret#2024!");
    let access_token = jwt.create_jwt(&account).unwrap();

    let (tx, _rx) = mpsc::channel(1);
    let handler = AuthHandler::new(MockAccountRepo::new(), jwt, tx);

    assert!(handler.refresh_token(&access_token).await.is_err());
}
