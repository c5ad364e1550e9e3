use std::sync::Once;

use coeus_core::{
    normalize_display_name, update, AppState, Effect, FlowError, Msg, Route, SessionSnapshot,
    ValidationError,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(coeus_logging::initialize_for_tests);
}

fn type_and_start(state: AppState, name: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::NameChanged(name.to_string()));
    update(state, Msg::StartClicked)
}

#[test]
fn normalization_collapses_trims_and_clamps() {
    let cases = [
        ("  Ada   Lovelace  ", "Ada Lovelace"),
        ("Ada\t\n Lovelace", "Ada Lovelace"),
        ("", ""),
        ("   ", ""),
        ("x", "x"),
        ("abcdefghijklmnopqrstuvwxyz", "abcdefghijklmnopqrstuvwx"),
        ("   Alan    Mathison   Turing   Jr   ", "Alan Mathison Turing Jr"),
        ("aaaaaaaaaaaaaaaaaaaaaaa bcd", "aaaaaaaaaaaaaaaaaaaaaaa"),
    ];
    for (input, expected) in cases {
        let once = normalize_display_name(input);
        assert_eq!(once, expected, "input {input:?}");
        assert_eq!(normalize_display_name(&once), once, "idempotent for {input:?}");
        assert!(once.chars().count() <= 24);
    }
}

#[test]
fn short_names_never_reach_the_network() {
    init_logging();
    for name in ["", " ", "A", "  b   "] {
        let (next, effects) = type_and_start(AppState::new(), name);
        assert!(effects.is_empty(), "no effect for {name:?}");
        assert!(!next.is_registering());
        assert_eq!(
            next.error(),
            Some(&FlowError::Validation(ValidationError::NameTooShort))
        );
        let view = next.view();
        assert!(!view.start_enabled);
        assert_eq!(
            view.error.as_deref(),
            Some("Please enter at least 2 characters.")
        );
    }
}

#[test]
fn registration_sends_normalized_name_and_persists_identity() {
    init_logging();
    let (state, effects) = type_and_start(AppState::new(), "  Ada   Lovelace  ");
    assert_eq!(
        effects,
        vec![Effect::Register {
            display_name: "Ada Lovelace".to_string()
        }]
    );
    assert!(state.is_registering());
    assert_eq!(state.view().name_counter, "12/24");
    assert_eq!(state.view().busy_label, Some("Joining..."));

    let (state, effects) = update(state, Msg::RegistrationDone(Ok("u-1".to_string())));
    assert_eq!(
        effects,
        vec![
            Effect::SaveSession(SessionSnapshot {
                display_name: Some("Ada Lovelace".to_string()),
                user_id: Some("u-1".to_string()),
                ..SessionSnapshot::default()
            }),
            Effect::Navigate(Route::Upload),
        ]
    );
    assert_eq!(state.route(), Route::Upload);
    let identity = state.identity().expect("identity");
    assert_eq!(identity.display_name, "Ada Lovelace");
    assert_eq!(identity.user_id, "u-1");
}

#[test]
fn second_start_while_registering_is_ignored() {
    init_logging();
    let (state, _) = type_and_start(AppState::new(), "Ada");
    let (state, effects) = update(state, Msg::StartClicked);
    assert!(effects.is_empty());
    assert!(state.is_registering());

    let (state, _) = update(state, Msg::NameChanged("Someone else".to_string()));
    assert_eq!(state.view().clean_name, "Ada");
}

#[test]
fn failed_registration_surfaces_message_and_allows_retry() {
    init_logging();
    let (state, _) = type_and_start(AppState::new(), "Ada");
    let (state, effects) = update(
        state,
        Msg::RegistrationDone(Err(FlowError::Backend {
            status: 500,
            message: "Internal server error while saving user data.".to_string(),
        })),
    );
    assert!(effects.is_empty());
    assert_eq!(state.route(), Route::Home);
    assert!(state.identity().is_none());
    assert_eq!(
        state.view().error.as_deref(),
        Some("Internal server error while saving user data.")
    );

    let (state, effects) = update(state, Msg::StartClicked);
    assert_eq!(effects.len(), 1);
    assert!(state.error().is_none());
}

#[test]
fn late_registration_answer_without_request_is_ignored() {
    let (state, effects) = update(AppState::new(), Msg::RegistrationDone(Ok("u-9".to_string())));
    assert!(effects.is_empty());
    assert!(state.identity().is_none());
}
