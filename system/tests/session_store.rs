use interview_system::rand::rngs::StdRng;
use interview_system::rand::SeedableRng;
use interview_system::{
    is_hex_color, is_valid_id, Language, SessionStatus, SessionStore, SessionUpdate, StoreError,
    DEFAULT_CODE, MAX_USERS_PER_SESSION, SESSION_ID_LEN, USER_ID_LEN,
};
use std::collections::HashSet;

fn seeded_store() -> SessionStore {
    SessionStore::with_rng(StdRng::seed_from_u64(2024))
}

#[test]
fn it_should_allocate_well_formed_ids() {
    let mut store = seeded_store();
    for _ in 0..50 {
        let session_id = store
            .create_session(Language::JavaScript, DEFAULT_CODE.into(), 0)
            .expect("")
            .id
            .clone();
        assert!(is_valid_id(&session_id, SESSION_ID_LEN));

        let user = store.add_user(&session_id, None, 0).expect("");
        assert!(is_valid_id(&user.id, USER_ID_LEN));
        assert!(is_hex_color(&user.color));
    }
    assert_eq!(store.len(), 50);
}

#[test]
fn it_should_reject_the_eleventh_join() {
    let mut store = seeded_store();
    let session_id = store
        .create_session(Language::Python, String::new(), 0)
        .expect("")
        .id
        .clone();

    for i in 0..MAX_USERS_PER_SESSION {
        store
            .add_user(&session_id, Some(format!("user{}", i)), i as i64)
            .expect("join within capacity");
    }

    assert_eq!(
        store.add_user(&session_id, None, 99),
        Err(StoreError::SessionAtCapacity(MAX_USERS_PER_SESSION))
    );
    assert_eq!(
        store.list_users(&session_id).expect("").len(),
        MAX_USERS_PER_SESSION
    );
}

#[test]
fn it_should_hand_out_distinct_colors_while_palette_lasts() {
    let mut store = seeded_store();
    let session_id = store
        .create_session(Language::Python, String::new(), 0)
        .expect("")
        .id
        .clone();

    for _ in 0..MAX_USERS_PER_SESSION {
        store.add_user(&session_id, None, 0).expect("");
    }

    let users = store.list_users(&session_id).expect("");
    let ids = users.iter().map(|u| u.id.as_str()).collect::<HashSet<_>>();
    let colors = users.iter().map(|u| u.color.as_str()).collect::<HashSet<_>>();
    assert_eq!(ids.len(), MAX_USERS_PER_SESSION);
    assert_eq!(colors.len(), MAX_USERS_PER_SESSION);
}

#[test]
fn it_should_delete_only_once() {
    let mut store = seeded_store();
    let session_id = store
        .create_session(Language::TypeScript, String::new(), 0)
        .expect("")
        .id
        .clone();
    assert!(store.delete_session(&session_id));
    assert!(!store.delete_session(&session_id));
    assert!(store.get_session(&session_id).is_none());
}

#[test]
fn it_should_keep_untouched_fields_on_partial_update() {
    let mut store = seeded_store();
    let session_id = store
        .create_session(Language::JavaScript, DEFAULT_CODE.into(), 7)
        .expect("")
        .id
        .clone();

    store
        .update_session(
            &session_id,
            SessionUpdate {
                code: Some("print('hi')".into()),
                ..Default::default()
            },
        )
        .expect("");

    let session = store.get_session(&session_id).expect("");
    assert_eq!(session.code, "print('hi')");
    assert_eq!(session.language, Language::JavaScript);
    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.created_at, 7);
}

#[test]
fn it_should_keep_join_order() {
    let mut store = seeded_store();
    let session_id = store
        .create_session(Language::Python, String::new(), 0)
        .expect("")
        .id
        .clone();
    for name in &["first", "second", "third"] {
        store
            .add_user(&session_id, Some(name.to_string()), 0)
            .expect("");
    }
    let names = store
        .list_users(&session_id)
        .expect("")
        .iter()
        .map(|u| u.name.clone())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn it_should_report_missing_session_on_join() {
    let mut store = seeded_store();
    assert_eq!(
        store.add_user("missing000", None, 0),
        Err(StoreError::SessionNotFound("missing000".into()))
    );
}
