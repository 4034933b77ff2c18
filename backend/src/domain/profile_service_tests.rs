//! Tests for the profile service.

use std::sync::{Arc, Mutex};

use super::*;
use crate::domain::ports::{FixtureUserRepository, MockProfileRepository, MockUserRepository};
use crate::domain::{ErrorCode, User};
use chrono::NaiveDate;
use rstest::{fixture, rstest};

type Service = ProfileService<MockProfileRepository, FixtureUserRepository>;

fn make_service(repo: MockProfileRepository) -> Service {
    ProfileService::new(Arc::new(repo), Arc::new(FixtureUserRepository))
}

fn experience(title: &str) -> ExperienceDraft {
    ExperienceDraft {
        title: title.to_owned(),
        company: "Acme".to_owned(),
        location: None,
        from: NaiveDate::from_ymd_opt(2021, 1, 4).expect("valid date"),
        to: None,
        current: true,
        description: None,
    }
}

fn education(school: &str) -> EducationDraft {
    EducationDraft {
        school: school.to_owned(),
        degree: "MSc".to_owned(),
        from: NaiveDate::from_ymd_opt(2015, 9, 1).expect("valid date"),
        to: None,
        current: false,
        description: None,
    }
}

#[fixture]
fn user_id() -> UserId {
    UserId::new("11111111-1111-1111-1111-111111111111").expect("fixture id")
}

#[fixture]
fn stored(user_id: UserId) -> Profile {
    Profile::create(
        user_id,
        ProfileInput {
            company: Some("Acme".to_owned()),
            status: Some("Developer".to_owned()),
            skills: Some("rust,sql".to_owned()),
            youtube: Some("https://youtube.example/ada".to_owned()),
            ..ProfileInput::default()
        }
        .into(),
        Utc::now(),
    )
}

/// Repository mock that records the last saved profile.
fn capturing_repo(existing: Option<Profile>) -> (MockProfileRepository, Arc<Mutex<Option<Profile>>>) {
    let saved = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&saved);
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_user()
        .times(1)
        .return_once(move |_| Ok(existing));
    repo.expect_save().times(1).returning(move |profile| {
        *sink.lock().expect("capture lock") = Some(profile.clone());
        Ok(())
    });
    (repo, saved)
}

#[rstest]
#[tokio::test]
async fn upsert_creates_profile_when_missing(user_id: UserId) {
    let (repo, saved) = capturing_repo(None);
    let service = make_service(repo);

    let result = service
        .upsert(
            &user_id,
            ProfileInput {
                status: Some("Developer".to_owned()),
                skills: Some("rust, sql".to_owned()),
                ..ProfileInput::default()
            },
        )
        .await
        .expect("upsert succeeds");

    assert_eq!(result.profile.user_id(), &user_id);
    assert_eq!(result.profile.skills(), ["rust", "sql"]);
    assert!(result.owner.is_none());
    let saved = saved.lock().expect("capture lock").clone();
    assert_eq!(saved.as_ref(), Some(&result.profile));
}

#[rstest]
#[tokio::test]
async fn upsert_merges_into_existing_profile(user_id: UserId, mut stored: Profile) {
    ExperienceEntry::section_mut(&mut stored).prepend(experience("E1"));
    let created_at = stored.created_at();
    let (repo, _saved) = capturing_repo(Some(stored));
    let service = make_service(repo);

    let result = service
        .upsert(
            &user_id,
            ProfileInput {
                status: Some("Lead".to_owned()),
                skills: Some("go".to_owned()),
                ..ProfileInput::default()
            },
        )
        .await
        .expect("upsert succeeds");

    let profile = result.profile;
    assert_eq!(profile.company(), Some("Acme"));
    assert_eq!(profile.status(), Some("Lead"));
    assert_eq!(profile.skills(), ["go"]);
    assert_eq!(profile.social(), &crate::domain::Social::default());
    assert_eq!(profile.experience().len(), 1);
    assert_eq!(profile.created_at(), created_at);
}

#[rstest]
#[tokio::test]
async fn upsert_maps_connection_failures_to_internal_errors(user_id: UserId) {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_user()
        .times(1)
        .return_once(|_| Err(ProfileRepositoryError::connection("refused")));
    repo.expect_save().never();
    let service = make_service(repo);

    let err = service
        .upsert(&user_id, ProfileInput::default())
        .await
        .expect_err("connection failure propagates");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn save_failures_surface_as_internal_errors(user_id: UserId) {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_user().times(1).return_once(|_| Ok(None));
    repo.expect_save()
        .times(1)
        .return_once(|_| Err(ProfileRepositoryError::query("constraint violated")));
    let service = make_service(repo);

    let err = service
        .upsert(&user_id, ProfileInput::default())
        .await
        .expect_err("save failure propagates");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn add_experience_requires_existing_profile(user_id: UserId) {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_user().times(1).return_once(|_| Ok(None));
    repo.expect_save().never();
    let service = make_service(repo);

    let err = service
        .add_experience(&user_id, experience("E1"))
        .await
        .expect_err("no implicit profile creation");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), NO_PROFILE_MESSAGE);
    assert_eq!(
        err.details().and_then(|d| d.get("code")).and_then(|c| c.as_str()),
        Some("profile_not_found")
    );
}

#[rstest]
#[tokio::test]
async fn add_education_prepends_entry(user_id: UserId, mut stored: Profile) {
    EducationEntry::section_mut(&mut stored).prepend(education("First"));
    let (repo, _saved) = capturing_repo(Some(stored));
    let service = make_service(repo);

    let result = service
        .add_education(&user_id, education("Second"))
        .await
        .expect("insert succeeds");

    let schools: Vec<_> = result
        .profile
        .education()
        .iter()
        .map(|e| e.school.as_str())
        .collect();
    assert_eq!(schools, ["Second", "First"]);
}

#[rstest]
#[tokio::test]
async fn update_with_unknown_id_saves_unchanged_profile(user_id: UserId, mut stored: Profile) {
    ExperienceEntry::section_mut(&mut stored).prepend(experience("E1"));
    let before = stored.clone();
    let (repo, saved) = capturing_repo(Some(stored));
    let service = make_service(repo);

    let result = service
        .update_experience(&user_id, Some(EntryId::random()), experience("X"))
        .await
        .expect("unknown ids are not an error");

    assert_eq!(result.profile, before);
    assert_eq!(saved.lock().expect("capture lock").as_ref(), Some(&before));
}

#[rstest]
#[tokio::test]
async fn update_with_unparsable_id_is_a_no_op(user_id: UserId, stored: Profile) {
    let before = stored.clone();
    let (repo, _saved) = capturing_repo(Some(stored));
    let service = make_service(repo);

    let result = service
        .update_education(&user_id, None, education("X"))
        .await
        .expect("unparsable ids are not an error");
    assert_eq!(result.profile, before);
}

#[rstest]
#[tokio::test]
async fn remove_experience_drops_matching_entry(user_id: UserId, mut stored: Profile) {
    let list = ExperienceEntry::section_mut(&mut stored);
    list.prepend(experience("E1"));
    let target = list.prepend(experience("E2"));
    let (repo, _saved) = capturing_repo(Some(stored));
    let service = make_service(repo);

    let result = service
        .remove_experience(&user_id, Some(target))
        .await
        .expect("removal succeeds");

    let titles: Vec<_> = result
        .profile
        .experience()
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, ["E1"]);
}

#[rstest]
#[tokio::test]
async fn delete_account_removes_profile_and_user(user_id: UserId) {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_delete_by_user()
        .times(1)
        .return_once(|_| Ok(true));
    let mut users = MockUserRepository::new();
    users.expect_delete().times(1).return_once(|_| Ok(false));
    let service = ProfileService::new(Arc::new(profiles), Arc::new(users));

    service
        .delete_account(&user_id)
        .await
        .expect("missing user is a no-op");
}

#[rstest]
#[tokio::test]
async fn own_profile_reports_missing_profile(user_id: UserId) {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_user().times(1).return_once(|_| Ok(None));
    let service = make_service(repo);

    let err = service
        .own_profile(&user_id)
        .await
        .expect_err("missing profile");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), NO_PROFILE_MESSAGE);
}

#[rstest]
#[case("not-a-uuid")]
#[case("507f1f77bcf86cd799439011")]
#[tokio::test]
async fn profile_for_user_treats_malformed_ids_as_not_found(#[case] raw: &str) {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_user().never();
    let service = make_service(repo);

    let err = service
        .profile_for_user(raw)
        .await
        .expect_err("malformed id");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), PROFILE_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn profile_for_user_joins_owner(user_id: UserId, stored: Profile) {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_user()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    let owner = User::try_new(user_id.clone(), "Ada", None).expect("valid owner");
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(owner)));
    let service = ProfileService::new(Arc::new(repo), Arc::new(users));

    let result = service
        .profile_for_user(user_id.as_ref())
        .await
        .expect("profile found");
    assert_eq!(result.owner.map(|o| o.name), Some("Ada".to_owned()));
}

#[rstest]
#[tokio::test]
async fn list_profiles_joins_known_owners() {
    let known = UserId::random();
    let orphan = UserId::random();
    let profiles = vec![
        Profile::create(known.clone(), ProfileUpdate::default(), Utc::now()),
        Profile::create(orphan, ProfileUpdate::default(), Utc::now()),
    ];
    let mut repo = MockProfileRepository::new();
    repo.expect_list_all()
        .times(1)
        .return_once(move || Ok(profiles));
    let owner = User::try_new(known, "Ada", None).expect("valid owner");
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .times(1)
        .return_once(move |_| Ok(vec![owner]));
    let service = ProfileService::new(Arc::new(repo), Arc::new(users));

    let listed = service.list_profiles().await.expect("listing succeeds");

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].owner.as_ref().map(|o| o.name.as_str()), Some("Ada"));
    assert!(listed[1].owner.is_none());
}
