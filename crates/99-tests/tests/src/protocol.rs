//! Error slot and result buffer handling across every exit path.

use std::sync::Arc;

use bridge::catalog::{BUILD_PACKAGE, DECODE_MODULE_BYTES, TEST_PACKAGE};
use bridge::fake::{FakeModule, FakeReply};
use bridge::{Bridge, BridgeError, BridgeResult, CallArgs, ErrorKind, Payload};
use bridge_abi::ViewBuffer;

use crate::support::start_bridge;

#[test]
fn reported_error_is_exact_and_result_is_never_read() {
    // An overstated result would be a protocol violation if it were read.
    let fake = Arc::new(FakeModule::replying(FakeReply {
        error: Some("failed to resolve dependency `0x1::coin` (héllo)".as_bytes().to_vec()),
        result: Some(b"ok".to_vec()),
        overstate_len: true,
        ..FakeReply::default()
    }));
    let err = start_bridge(&fake, 1)
        .call_blocking(BUILD_PACKAGE, CallArgs::new().text("cfg"))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "failed to resolve dependency `0x1::coin` (héllo)"
    );
    assert_eq!(err.kind(), ErrorKind::Reported);
    assert_eq!(fake.allocated(), 2);
    assert_eq!(fake.released(), 2);
}

#[test]
fn present_empty_error_slot_is_still_a_failure() {
    let fake = Arc::new(FakeModule::replying(FakeReply {
        error: Some(Vec::new()),
        result: Some(b"ok".to_vec()),
        ..FakeReply::default()
    }));
    let err = start_bridge(&fake, 1)
        .call_blocking(BUILD_PACKAGE, CallArgs::new().text("cfg"))
        .unwrap_err();
    assert!(matches!(err, BridgeError::Reported(message) if message.is_empty()));
}

#[test]
fn both_slots_absent_is_never_an_empty_success() {
    let fake = Arc::new(FakeModule::replying(FakeReply::silent()));
    let bridge = start_bridge(&fake, 1);

    let blocking = bridge.call_blocking(BUILD_PACKAGE, CallArgs::new().text("cfg"));
    let queued = bridge
        .call(BUILD_PACKAGE, CallArgs::new().text("cfg"))
        .expect("queue")
        .wait();

    for outcome in [blocking, queued] {
        let err = outcome.unwrap_err();
        assert!(matches!(err, BridgeError::NoResult));
        assert_eq!(err.kind(), ErrorKind::ProtocolAnomaly);
        assert!(err.to_string().starts_with("unknown error"));
    }
}

#[test]
fn length_beyond_capacity_is_a_protocol_violation() {
    let fake = Arc::new(FakeModule::replying(FakeReply::overstated(vec![1, 2, 3])));
    let err = start_bridge(&fake, 1)
        .call_blocking(DECODE_MODULE_BYTES, CallArgs::new().bytes(&[1]))
        .unwrap_err();
    assert!(matches!(err, BridgeError::Protocol(_)), "{err}");
    assert_eq!(fake.released(), 1);
}

#[test]
fn error_slot_length_beyond_capacity_is_a_protocol_violation() {
    let fake = Arc::new(FakeModule::replying(FakeReply::overstated_error("boom")));
    let err = start_bridge(&fake, 1)
        .call_blocking(BUILD_PACKAGE, CallArgs::new().text("cfg"))
        .unwrap_err();
    assert!(matches!(err, BridgeError::Protocol(_)), "{err}");
    assert_eq!(err.kind(), ErrorKind::ProtocolAnomaly);
    assert_eq!(fake.allocated(), 1);
    assert_eq!(fake.released(), 1);
}

#[test]
fn malformed_error_text_is_a_decoding_failure() {
    let fake = Arc::new(FakeModule::replying(FakeReply {
        error: Some(vec![0xc3, 0x28]),
        ..FakeReply::default()
    }));
    let err = start_bridge(&fake, 1)
        .call_blocking(BUILD_PACKAGE, CallArgs::new().text("cfg"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decoding);
    assert_eq!(fake.released(), 1);
}

#[test]
fn every_buffer_is_released_exactly_once() {
    let replies = [
        FakeReply::ok_text("ok"),
        FakeReply::ok_bytes(Vec::new()),
        FakeReply::error("boom"),
        FakeReply::silent(),
        FakeReply::overstated(vec![9; 16]),
        FakeReply {
            error: Some(vec![0xff]),
            result: Some(vec![1]),
            ..FakeReply::default()
        },
    ];
    let script = Arc::new(replies.to_vec());
    let cursor = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let fake = {
        let script = Arc::clone(&script);
        let cursor = Arc::clone(&cursor);
        Arc::new(FakeModule::new(move |_| {
            let index = cursor.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            script[index % script.len()].clone()
        }))
    };
    let bridge = start_bridge(&fake, 3);

    for _ in 0..replies.len() {
        let _ = bridge.call_blocking(BUILD_PACKAGE, CallArgs::new().text("cfg"));
    }
    let pending: Vec<_> = (0..replies.len())
        .map(|_| bridge.call(BUILD_PACKAGE, CallArgs::new().text("cfg")).expect("queue"))
        .collect();
    let _ = futures::executor::block_on(futures::future::join_all(pending));

    assert_eq!(fake.call_count(), replies.len() * 2);
    assert_eq!(fake.allocated(), 12);
    assert_eq!(fake.released(), fake.allocated());
}

#[test]
fn unknown_operation_fails_before_any_native_call() {
    let fake = Arc::new(FakeModule::replying(FakeReply::ok_text("ok")));
    let bridge = start_bridge(&fake, 1);

    let err = bridge
        .call_blocking("prove_package", CallArgs::new().text("cfg"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownOperation);

    let err = bridge
        .call_blocking(TEST_PACKAGE, CallArgs::new().text("cfg"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);

    assert_eq!(fake.call_count(), 0);
}

fn decode_with_declared_len(
    bridge: &Bridge,
    bytes: Vec<u8>,
    declared: usize,
) -> BridgeResult<Payload> {
    let view = ViewBuffer::with_declared_len(bytes, declared)?;
    bridge.call_blocking(DECODE_MODULE_BYTES, CallArgs::new().view(view))
}

#[test]
fn overlong_view_is_rejected_locally() {
    let fake = Arc::new(FakeModule::replying(FakeReply::ok_text("{}")));
    let bridge = start_bridge(&fake, 1);

    let err = decode_with_declared_len(&bridge, vec![0xa1, 0x1c, 0xeb], 8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    assert_eq!(fake.call_count(), 0);

    decode_with_declared_len(&bridge, vec![0xa1, 0x1c, 0xeb], 2).expect("prefix view");
    assert_eq!(fake.call_count(), 1);
}
