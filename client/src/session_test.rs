use super::test_helpers::*;
use super::*;

use protocol::GameAction;

use crate::surface::{RecordingSurface, SurfaceOp};

#[test]
fn ping_is_answered_with_pong() {
    let mut session = Session::new();
    let mut surface = RecordingSurface::new();

    session
        .handle_frame(r#"{"type":"ping"}"#, &mut surface)
        .expect("dispatch");
    assert_eq!(session.take_outbound(), vec![ClientMessage::Pong]);
    assert!(surface.ops.is_empty());
}

#[test]
fn unknown_type_is_logged_and_dropped() {
    let mut session = Session::new();
    let mut surface = RecordingSurface::new();

    session
        .handle_frame(r#"{"type":"lobby_info","payload":{"x":1}}"#, &mut surface)
        .expect("unknown types must not fail dispatch");
    assert!(session.take_outbound().is_empty());
    assert!(surface.ops.is_empty());
}

#[test]
fn malformed_json_fails_the_dispatch() {
    let mut session = Session::new();
    let mut surface = RecordingSurface::new();

    let err = session
        .handle_frame("{broken", &mut surface)
        .expect_err("should fail");
    assert!(matches!(err, DispatchError::Codec(_)));
}

#[test]
fn server_error_is_surfaced_verbatim() {
    let mut session = Session::new();
    let mut surface = RecordingSurface::new();

    session
        .handle_frame(
            r#"{"type":"error","payload":{"message":"cannot place there"}}"#,
            &mut surface,
        )
        .expect("dispatch");
    assert_eq!(surface.ops, vec![SurfaceOp::ShowError("cannot place there".into())]);
}

#[test]
fn validation_failure_applies_nothing() {
    let (mut session, mut surface) = started_session(0, 0);
    session.rotate_piece(&mut surface);
    let mask_before = session.current_mask();
    session.take_outbound();
    surface.reset();

    let mut bad = game_info(1);
    bad.scores.clear();
    let text = protocol::encode_server(&ServerMessage::GameInfo(bad)).expect("encode");
    let err = session
        .handle_frame(&text, &mut surface)
        .expect_err("empty scores must fail validation");
    assert!(matches!(err, DispatchError::Payload(_)));

    // Nothing was painted and no state moved: the turn is still ours and
    // the rotation we picked survived.
    assert!(surface.ops.is_empty());
    assert!(session.is_my_turn());
    assert_eq!(session.current_mask(), mask_before);
}

#[test]
fn intents_queue_in_send_order() {
    let (mut session, mut surface) = started_session(0, 0);

    session.skip_turn(&mut surface);
    let outbound = session.take_outbound();
    assert_eq!(outbound.len(), 2);
    assert!(matches!(outbound[0], ClientMessage::ButtonUpdate(_)));
    assert!(matches!(
        outbound[1],
        ClientMessage::GameUpdate { action: GameAction::SkipTurn }
    ));

    // Draining leaves the queue empty.
    assert!(session.take_outbound().is_empty());
}
