//! Property tests for the navigation engine.
//!
//! Sessions are driven by arbitrary token sequences mixing real option ids,
//! reserved words and junk, so every branch of the engine gets exercised.

use proptest::prelude::*;

use ussd_sim::{create_session, Catalog, Engine, ScreenKind, Session, SUBMITTED};

fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(vec![
            "banking", "balance", "transfer", "mobile", "statement", "airtime", "self",
            "5", "10", "bills", "account", "profile",
        ])
        .prop_map(String::from),
        2 => Just("back".to_string()),
        1 => Just("start".to_string()),
        2 => "[a-z0-9.+]{0,8}",
    ]
}

/// Any non-reserved token, including ones that name real screens
fn arb_payload() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9 .+*#]{0,12}",
        Just("banking".to_string()),
        Just("submitted".to_string()),
    ]
    .prop_filter("reserved", |t| t != "back" && t != "start")
}

fn drive(engine: &Engine, tokens: &[String]) -> Session {
    tokens.iter().fold(create_session(), |session, token| {
        engine.transition(&session, token).session
    })
}

proptest! {
    #[test]
    fn reset_always_returns_root(tokens in prop::collection::vec(arb_token(), 0..12)) {
        let engine = Engine::default();
        let session = drive(&engine, &tokens);

        let t = engine.transition(&session, "start");
        prop_assert!(t.session.current_path.is_empty());
        prop_assert_eq!(&t.screen, Catalog::builtin().lookup("start").unwrap());
    }

    #[test]
    fn back_undoes_a_forward_step(
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..8),
        payload in arb_payload(),
    ) {
        let engine = Engine::default();
        let mut session = engine.transition(&create_session(), "start").session;

        for pick in &picks {
            let screen = engine.current_screen(&session.current_path);
            let candidates: Vec<String> = if screen.is_awaiting_input() {
                vec![payload.clone()]
            } else {
                screen
                    .options
                    .iter()
                    .map(|o| o.id.clone())
                    .filter(|id| id != "back" && id != "start")
                    .collect()
            };
            let forwards: Vec<_> = candidates
                .iter()
                .map(|token| engine.transition(&session, token))
                .filter(|t| t.session.current_path.len() == session.current_path.len() + 1)
                .collect();
            if forwards.is_empty() {
                break;
            }

            let forward = &forwards[pick.index(forwards.len())];
            let back = engine.transition(&forward.session, "back");
            prop_assert_eq!(&back.session.current_path, &session.current_path);
            prop_assert_eq!(&back.screen, &screen);

            session = forward.session.clone();
        }
    }

    #[test]
    fn transition_is_total(
        tokens in prop::collection::vec(arb_token(), 0..12),
        next in ".{0,16}",
    ) {
        let engine = Engine::default();
        let session = drive(&engine, &tokens);

        let t = engine.transition(&session, &next);
        prop_assert!(matches!(
            t.screen.kind,
            ScreenKind::Menu | ScreenKind::Input | ScreenKind::Message | ScreenKind::End
        ));
        prop_assert_eq!(t.session.id, session.id);
    }

    #[test]
    fn history_grows_by_one(tokens in prop::collection::vec(arb_token(), 1..16)) {
        let engine = Engine::default();
        let mut session = create_session();
        for token in &tokens {
            let len = session.history.len();
            let t = engine.transition(&session, token);
            prop_assert_eq!(t.session.history.len(), len + 1);
            prop_assert_eq!(t.session.history.last(), Some(&t.screen));
            session = t.session;
        }
    }

    #[test]
    fn input_submission_ignores_content(
        prefix in prop::sample::select(vec![
            vec!["banking", "balance"],
            vec!["banking", "transfer", "mobile"],
            vec!["banking", "transfer", "mobile", "submitted"],
            vec!["airtime", "self", "5"],
        ]),
        payload in arb_payload(),
    ) {
        let engine = Engine::default();
        let mut session = create_session();
        session.current_path = prefix.iter().map(|s| s.to_string()).collect();

        let t = engine.transition(&session, &payload);
        let mut expected = session.current_path.clone();
        expected.push(SUBMITTED.to_string());
        prop_assert_eq!(t.session.current_path, expected);
    }
}
