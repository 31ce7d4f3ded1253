//! Frozen wire vectors. A change here is a wire break with the native module.

use payload_codec::schema::SCHEMA_VERSION_V1;
use payload_codec::{
    decode_compiler_arguments, decode_test_options, Address, BuildOptions, BytecodeVersion,
    PayloadBuilder, TestOptions,
};

fn scenario_builder() -> PayloadBuilder {
    PayloadBuilder::new(
        "p",
        BuildOptions::default()
            .with_bytecode_version(BytecodeVersion::V7)
            .with_compiler_version("2")
            .with_language_version("1")
            .with_named_address("test", "0x4"),
    )
}

#[test]
fn schema_version_is_v1() {
    assert_eq!(SCHEMA_VERSION_V1, 1);
}

#[test]
fn default_test_options_golden() {
    let bytes = PayloadBuilder::test_payload(&TestOptions::default()).expect("encode");
    assert_eq!(bytes, [0, 0, 0, 0, 0]);
}

#[test]
fn filtered_test_options_golden() {
    let options = TestOptions {
        filter: Some("ab".into()),
        report_statistics: true,
        ..TestOptions::default()
    };
    let bytes = PayloadBuilder::test_payload(&options).expect("encode");
    assert_eq!(bytes, [1, 2, b'a', b'b', 1, 0, 0, 0]);
}

#[test]
fn compiler_arguments_golden() {
    let bytes = scenario_builder().compiler_payload().expect("encode");

    let mut expected = vec![
        1, 1, b'p', // package_path: Some("p")
        0, // verbose
        0, 0, 0, 0, // dev_mode, test_mode, generate_docs, generate_abis
        0, // install_dir: None
        0, 0, 0, // force_recompilation, fetch_deps_only, skip_fetch_latest_git_deps
        7, 0, 0, 0, // bytecode_version: u32 LE
        1, b'2', // compiler_version
        1, b'1', // language_version
        1, // one named address
        4, b't', b'e', b's', b't',
    ];
    expected.extend_from_slice(&[0; 31]);
    expected.push(4);

    assert_eq!(bytes.len(), 58);
    assert_eq!(bytes, expected);
}

#[test]
fn scenario_decodes_with_exact_fields() {
    let bytes = scenario_builder().compiler_payload().expect("encode");
    let decoded = decode_compiler_arguments(&bytes).expect("decode");
    let config = decoded.build_config;

    assert_eq!(config.bytecode_version, 7);
    assert_eq!(config.compiler_version, "2");
    assert_eq!(config.language_version, "1");
    assert_eq!(
        config.additional_named_addresses,
        vec![("test".to_string(), Address::parse("0x4").expect("address"))]
    );

    assert!(!decoded.verbose);
    assert!(!config.dev_mode);
    assert!(!config.test_mode);
    assert!(!config.generate_docs);
    assert!(!config.generate_abis);
    assert!(!config.force_recompilation);
    assert!(!config.fetch_deps_only);
    assert!(!config.skip_fetch_latest_git_deps);
    assert_eq!(config.install_dir, None);
}

#[test]
fn unset_and_empty_install_dir_are_distinct() {
    let unset = PayloadBuilder::new("p", BuildOptions::default())
        .compiler_payload()
        .expect("encode");
    let empty = PayloadBuilder::new(
        "p",
        BuildOptions {
            install_dir: Some(String::new()),
            ..BuildOptions::default()
        },
    )
    .compiler_payload()
    .expect("encode");

    // tag byte for install_dir sits after path (3), verbose (1) and four flags (4)
    assert_eq!(unset[8], 0);
    assert_eq!(&empty[8..10], &[1, 0]);
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut bytes = PayloadBuilder::test_payload(&TestOptions::default()).expect("encode");
    bytes.push(0);
    assert!(decode_test_options(&bytes).is_err());
}
