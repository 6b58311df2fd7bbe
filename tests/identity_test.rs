mod common;

use sea_orm::DatabaseConnection;
use std::time::{Duration, Instant};

use ctd_log::cast;
use ctd_log::entity::users;
use ctd_log::entity::roles::RoleName;
use ctd_log::error::{AppError, AppResult, AuthError};
use ctd_log::identity::session::SessionStore;
use ctd_log::identity::{self, LoginFailure, accounts, authorize};

async fn login(db: &DatabaseConnection, username: &str, password: &str) -> AppResult<users::Model> {
    identity::authenticate(db, username, password, common::BCRYPT_COST).await
}

async fn refusal(db: &DatabaseConnection, username: &str, password: &str) -> Option<LoginFailure> {
    identity::check_credentials(db, username, password, common::BCRYPT_COST)
        .await
        .unwrap()
        .err()
}

fn is_invalid_credentials(err: &AppError) -> bool {
    matches!(err, AppError::Auth(AuthError::InvalidCredentials))
}

#[tokio::test]
async fn login_failures_look_identical() {
    let db = common::setup_db().await;
    let user = common::user(&db, "jdoe", &[RoleName::Console]).await;
    common::user(&db, "retired", &[RoleName::Observer]).await;
    let retired = accounts::list_users(&db)
        .await
        .unwrap()
        .into_iter()
        .find(|u| u.username == "retired")
        .unwrap();
    accounts::set_user_active(&db, retired.user_id, false).await.unwrap();

    let unknown = login(&db, "nobody", common::PASSWORD).await.unwrap_err();
    let wrong = login(&db, "jdoe", "not it").await.unwrap_err();
    let inactive = login(&db, "retired", common::PASSWORD).await.unwrap_err();

    assert!(is_invalid_credentials(&unknown));
    assert!(is_invalid_credentials(&wrong));
    assert!(is_invalid_credentials(&inactive));
    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(wrong.to_string(), inactive.to_string());

    // The reasons stay distinguishable inside the crate
    assert_eq!(
        refusal(&db, "nobody", common::PASSWORD).await,
        Some(LoginFailure::UnknownUser)
    );
    assert_eq!(
        refusal(&db, "jdoe", "not it").await,
        Some(LoginFailure::WrongPassword)
    );
    assert_eq!(
        refusal(&db, "retired", common::PASSWORD).await,
        Some(LoginFailure::Inactive)
    );

    let ok = login(&db, "jdoe", common::PASSWORD).await.unwrap();
    assert_eq!(ok.user_id, user.user_id);
}

#[tokio::test]
async fn unknown_usernames_cost_as_much_as_wrong_passwords() {
    const COST: u32 = 8;
    let db = common::setup_db().await;
    accounts::create_user(
        &db,
        accounts::NewUser {
            username: "deckhand".into(),
            password: common::PASSWORD.into(),
            first_name: "Deck".into(),
            last_name: "Hand".into(),
            roles: vec![RoleName::Sampler],
        },
        COST,
    )
    .await
    .unwrap();

    let mut unknown = Duration::ZERO;
    let mut wrong = Duration::ZERO;
    for _ in 0..3 {
        let started = Instant::now();
        assert!(identity::authenticate(&db, "nobody", "guess", COST).await.is_err());
        unknown += started.elapsed();

        let started = Instant::now();
        assert!(identity::authenticate(&db, "deckhand", "guess", COST).await.is_err());
        wrong += started.elapsed();
    }

    assert!(
        unknown * 3 > wrong,
        "unknown user took {unknown:?}, wrong password took {wrong:?}"
    );
}

#[tokio::test]
async fn roles_are_a_plain_set() {
    let db = common::setup_db().await;
    let user = common::user(&db, "mixed", &[RoleName::Bottlecop, RoleName::Observer]).await;

    let model = login(&db, "mixed", common::PASSWORD).await.unwrap();
    let who = identity::load_identity(&db, &model).await.unwrap();
    assert_eq!(who.full_name, "Test mixed");
    assert!(authorize(&who, RoleName::Bottlecop));
    assert!(authorize(&who, RoleName::Observer));
    assert!(!authorize(&who, RoleName::Admin));

    let updated = accounts::set_user_roles(&db, user.user_id, &[RoleName::Admin]).await.unwrap();
    assert_eq!(updated.roles, vec![RoleName::Admin]);
    let roles = identity::roles_of(&db, user.user_id).await.unwrap();
    assert_eq!(roles.into_iter().collect::<Vec<_>>(), vec![RoleName::Admin]);
}

#[tokio::test]
async fn usernames_are_unique() {
    let db = common::setup_db().await;
    common::user(&db, "jdoe", &[]).await;

    let err = accounts::create_user(
        &db,
        accounts::NewUser {
            username: "jdoe".into(),
            password: "other".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            roles: vec![],
        },
        4,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "username"));
}

#[tokio::test]
async fn password_change_takes_effect() {
    let db = common::setup_db().await;
    let user = common::user(&db, "jdoe", &[RoleName::Sampler]).await;

    accounts::change_password(&db, user.user_id, "new secret".into(), common::BCRYPT_COST).await.unwrap();
    assert!(login(&db, "jdoe", common::PASSWORD).await.is_err());
    assert!(login(&db, "jdoe", "new secret").await.is_ok());
}

#[tokio::test]
async fn delete_rules() {
    let db = common::setup_db().await;
    let admin = common::user(&db, "boss", &[RoleName::Admin]).await;
    let voyage = common::voyage(&db).await;
    let idle = common::user(&db, "idle", &[RoleName::Analyst]).await;

    let own = accounts::delete_user(&db, admin.user_id, admin.user_id).await.unwrap_err();
    assert!(own.is_validation());

    cast::create_cast(&db, voyage.new_cast(1)).await.unwrap();
    let referenced = accounts::delete_user(&db, admin.user_id, voyage.observer_id)
        .await
        .unwrap_err();
    assert!(referenced.is_validation());

    accounts::delete_user(&db, admin.user_id, idle.user_id).await.unwrap();
    assert!(accounts::get_user(&db, idle.user_id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn default_admin_is_created_once() {
    let db = common::setup_db().await;

    let mut config = common::test_config();
    assert_eq!(accounts::ensure_default_admin(&db, &config).await.unwrap(), None);

    config.default_admin_password = Some("changeme".into());
    let created = accounts::ensure_default_admin(&db, &config).await.unwrap();
    assert!(created.is_some());
    assert_eq!(accounts::ensure_default_admin(&db, &config).await.unwrap(), None);

    let admin = login(&db, "admin", "changeme").await.unwrap();
    let roles = identity::roles_of(&db, admin.user_id).await.unwrap();
    assert!(roles.contains(&RoleName::Admin));
}

#[tokio::test]
async fn revoking_a_user_closes_their_sessions() {
    let db = common::setup_db().await;
    common::user(&db, "jdoe", &[RoleName::Console]).await;
    let model = login(&db, "jdoe", common::PASSWORD).await.unwrap();
    let who = identity::load_identity(&db, &model).await.unwrap();

    let sessions = SessionStore::new(Duration::from_secs(60));
    let first = sessions.open(who.clone()).await;
    let second = sessions.open(who.clone()).await;
    assert_eq!(sessions.resolve(first).await, Some(who.clone()));

    sessions.close(first).await;
    assert_eq!(sessions.resolve(first).await, None);
    assert!(sessions.resolve(second).await.is_some());

    sessions.revoke_user(who.user_id);
    assert_eq!(sessions.resolve(second).await, None);
}
