use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use showcase_api::entities::profile::{Profile, ProfileInsert};
use showcase_api::errors::AppError;
use showcase_api::ownership::Actor;
use showcase_api::repositories::profile::ProfileRepository;
use showcase_api::use_cases::provisioning::{AccountCreated, ProfileProvisioner};

mock! {
    pub ProfileRepo {}

    #[async_trait]
    impl ProfileRepository for ProfileRepo {
        async fn create_profile(&self, actor: &Actor, profile: &ProfileInsert) -> Result<bool, AppError>;
        async fn get_profile(&self, actor: &Actor, id: &Uuid) -> Result<Profile, AppError>;
        async fn update_profile(&self, actor: &Actor, id: &Uuid, username: &str) -> Result<Profile, AppError>;
    }
}

#[tokio::test]
async fn provisions_a_profile_from_the_email_local_part() {
    let account_id = Uuid::new_v4();

    let mut repo = MockProfileRepo::new();
    repo.expect_create_profile()
        .withf(move |actor, profile| {
            *actor == Actor::Service && profile.id == account_id && profile.username == "alice"
        })
        .returning(|_, _| Ok(true));

    let provisioner = ProfileProvisioner::new(repo);
    let created = provisioner
        .handle(&AccountCreated {
            account_id,
            email: "alice@example.com".into(),
            username: None,
        })
        .await
        .unwrap();

    assert!(created);
}

#[tokio::test]
async fn metadata_username_beats_the_email_local_part() {
    let account_id = Uuid::new_v4();

    let mut repo = MockProfileRepo::new();
    repo.expect_create_profile()
        .withf(|_, profile| profile.username == "bob123")
        .returning(|_, _| Ok(true));

    let provisioner = ProfileProvisioner::new(repo);
    provisioner
        .handle(&AccountCreated {
            account_id,
            email: "robert@example.com".into(),
            username: Some("bob123".into()),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn a_replayed_event_does_not_create_a_second_row() {
    let mut repo = MockProfileRepo::new();
    repo.expect_create_profile().returning(|_, _| Ok(false));

    let provisioner = ProfileProvisioner::new(repo);
    let created = provisioner
        .handle(&AccountCreated {
            account_id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            username: None,
        })
        .await
        .unwrap();

    assert!(!created);
}

#[tokio::test]
async fn an_email_without_at_becomes_the_whole_username() {
    let mut repo = MockProfileRepo::new();
    repo.expect_create_profile()
        .withf(|_, profile| profile.username == "not-an-email")
        .returning(|_, _| Ok(true));

    let provisioner = ProfileProvisioner::new(repo);
    provisioner
        .handle(&AccountCreated {
            account_id: Uuid::new_v4(),
            email: "not-an-email".into(),
            username: None,
        })
        .await
        .unwrap();
}
