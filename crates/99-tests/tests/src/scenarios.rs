//! Package and module workflows driven through the full stack.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use bridge::catalog::{BUILD_PACKAGE, DECODE_MODULE_BYTES, READ_MODULE_METADATA};
use bridge::fake::{FakeArg, FakeModule, FakeReply};
use bridge::{CallArgs, Payload};
use futures::executor::block_on;
use futures::future::join_all;
use move_builder::module::{decode_module_bytes, read_module_info};
use move_builder::{BuildOptions, BytecodeVersion, CleanOptions, PackageBuilder};
use payload_codec::{decode_compiler_arguments, Address};

use crate::support::start_bridge;

fn package(fake: &Arc<FakeModule>, options: BuildOptions) -> anyhow::Result<PackageBuilder> {
    Ok(PackageBuilder::new(
        start_bridge(fake, 2),
        "/contracts/dummy",
        options,
    )?)
}

#[test]
fn clean_twice_succeeds_both_times() -> anyhow::Result<()> {
    let cleaned = Arc::new(AtomicBool::new(false));
    let fake = {
        let cleaned = Arc::clone(&cleaned);
        Arc::new(FakeModule::new(move |_| {
            cleaned.store(true, Ordering::SeqCst);
            FakeReply::ok_text("ok")
        }))
    };
    let builder = package(&fake, BuildOptions::default())?;

    assert_eq!(block_on(builder.clean(CleanOptions::default()))?, "ok");
    assert_eq!(block_on(builder.clean(CleanOptions::default()))?, "ok");

    assert!(cleaned.load(Ordering::SeqCst));
    let calls = fake.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    Ok(())
}

#[test]
fn build_configuration_reaches_the_callee_intact() -> anyhow::Result<()> {
    let fake = Arc::new(FakeModule::new(|call| match &call.args[0] {
        FakeArg::View(Some(bytes)) => match decode_compiler_arguments(bytes) {
            Ok(args) if args.build_config.bytecode_version == 7 => FakeReply::ok_text("ok"),
            Ok(_) => FakeReply::error("unexpected bytecode version"),
            Err(err) => FakeReply::error(&err.to_string()),
        },
        _ => FakeReply::error("missing compiler arguments"),
    }));
    let options = BuildOptions::default()
        .with_bytecode_version(BytecodeVersion::V7)
        .with_compiler_version("2")
        .with_language_version("1")
        .with_named_address("test", "0x4");
    let builder = package(&fake, options)?;

    assert_eq!(builder.build_blocking()?, "ok");

    let FakeArg::View(Some(bytes)) = &fake.calls()[0].args[0] else {
        anyhow::bail!("compiler arguments were not sent as a view");
    };
    let args = decode_compiler_arguments(bytes)?;
    let config = args.build_config;
    assert_eq!(config.compiler_version, "2");
    assert_eq!(config.language_version, "1");
    assert_eq!(
        config.additional_named_addresses,
        [("test".to_string(), Address::parse("0x4")?)]
    );
    assert!(!config.dev_mode && !config.test_mode);
    assert!(!config.generate_docs && !config.generate_abis);
    assert!(!config.force_recompilation && !config.fetch_deps_only);
    assert!(!config.skip_fetch_latest_git_deps);
    Ok(())
}

#[test]
fn decoded_module_matches_declared_identity() -> anyhow::Result<()> {
    let fake = Arc::new(FakeModule::new(|call| match call.operation {
        READ_MODULE_METADATA => FakeReply::ok_text(r#"{"address":"0x4","name":"hihi"}"#),
        _ => FakeReply::ok_text(
            r#"{"address":"0x4","name":"hihi","friends":[],"exposed_functions":[
                {"name":"return_0","visibility":"public","is_entry":false,"is_view":false,
                 "generic_type_params":[],"params":[],"return":["u32"]},
                {"name":"return_10","visibility":"public","is_entry":false,"is_view":false,
                 "generic_type_params":[],"params":[],"return":["u32"]},
                {"name":"call_friend","visibility":"public","is_entry":false,"is_view":false,
                 "generic_type_params":[],"params":[],"return":["u32"]}],
              "structs":[]}"#,
        ),
    }));
    let bridge = start_bridge(&fake, 2);
    let bytes = [0xa1, 0x1c, 0xeb, 0x0b];

    let info = block_on(read_module_info(&bridge, &bytes))?;
    let module = block_on(decode_module_bytes(&bridge, &bytes))?;

    assert_eq!((module.address.as_str(), module.name.as_str()), ("0x4", "hihi"));
    assert_eq!((info.address, info.name), (module.address.clone(), module.name.clone()));
    let order: Vec<_> = module
        .exposed_functions
        .iter()
        .map(|function| function.name.as_str())
        .collect();
    assert_eq!(order, ["return_0", "return_10", "call_friend"]);
    Ok(())
}

#[test]
fn concurrent_calls_keep_their_own_results() {
    let fake = Arc::new(FakeModule::new(|call| match call.args[0].text() {
        Some(text) => FakeReply::ok_text(&format!("echo:{text}")),
        None => FakeReply::silent(),
    }));
    let bridge = start_bridge(&fake, 4);

    let pending: Vec<_> = (0..32)
        .map(|index| {
            bridge
                .call(DECODE_MODULE_BYTES, CallArgs::new().text(&index.to_string()))
                .expect("queue")
        })
        .collect();
    let results = block_on(join_all(pending));

    for (index, result) in results.into_iter().enumerate() {
        assert_eq!(
            result.expect("call"),
            Payload::Text(format!("echo:{index}"))
        );
    }
    assert_eq!(fake.call_count(), 32);
    assert_eq!(fake.released(), 32);
}

#[test]
fn blocking_calls_run_on_separate_threads() {
    let fake = Arc::new(FakeModule::replying(FakeReply::ok_text("ok")));
    let bridge = start_bridge(&fake, 1);

    thread::scope(|scope| {
        for _ in 0..4 {
            let bridge = bridge.clone();
            scope.spawn(move || {
                let payload = bridge
                    .call_blocking(BUILD_PACKAGE, CallArgs::new().text("cfg"))
                    .expect("call");
                assert_eq!(payload, Payload::Text("ok".into()));
            });
        }
    });
    assert_eq!(fake.released(), 4);
}

#[test]
fn dropped_pending_call_still_releases_buffers() {
    let (open, gate) = crossbeam_channel::bounded::<()>(0);
    let fake = Arc::new(FakeModule::new(move |_| {
        let _ = gate.recv();
        FakeReply::ok_bytes(vec![0xa1, 0x1c])
    }));
    let bridge = start_bridge(&fake, 1);

    let pending = bridge
        .call(DECODE_MODULE_BYTES, CallArgs::new().bytes(&[1, 2, 3]))
        .expect("queue");
    drop(pending);
    assert_eq!(fake.released(), 0);

    open.send(()).expect("release the native call");
    // Dropping the last handle joins the workers after the queue drains.
    drop(bridge);

    assert_eq!(fake.call_count(), 1);
    assert_eq!(fake.allocated(), 1);
    assert_eq!(fake.released(), 1);
}
