//! End-to-end scenarios over the built-in catalogs.
//!
//! Covers:
//! - Deferred construction with and without the required secret
//! - Missing-config reporting through the factory
//! - Unknown uids vs missing configuration
//! - Running the erased annotation/SUT pipelines after construction

use vd_plugins::llama_guard::TogetherApiKey;
use vd_plugins::{
    builtin_annotators, builtin_suts, Completion, Prompt, LLAMA_GUARD_MOCK_UID,
    LLAMA_GUARD_TOGETHER_UID, MOCK_SUT_UID,
};
use vd_registry::RegistryError;
use vd_secrets::{ConfigKey, RawConfig};

#[test]
fn test_together_annotator_reports_missing_api_key() {
    let annotators = builtin_annotators().unwrap();
    let Err(error) = annotators.make_instance(LLAMA_GUARD_TOGETHER_UID, &RawConfig::new()) else {
        panic!("construction must fail without the api key");
    };

    let RegistryError::MissingConfig(missing) = error else {
        panic!("expected a missing-config error");
    };
    assert_eq!(missing.descriptions(), &[TogetherApiKey::description()]);
}

#[test]
fn test_together_annotator_builds_once_key_is_supplied() {
    let annotators = builtin_annotators().unwrap();
    let mut raw = RawConfig::new();
    raw.insert("together", "api_key", "XYZ");

    let annotator = annotators
        .make_instance(LLAMA_GUARD_TOGETHER_UID, &raw)
        .unwrap();
    assert_eq!(annotator.uid(), LLAMA_GUARD_TOGETHER_UID);

    // Built-in catalog wires the mock backend, so the pipeline runs
    // offline end to end.
    let verdict = annotator
        .annotate_pair(&Prompt::new("hi"), &Completion::new("hello"))
        .unwrap();
    assert_eq!(verdict["is_safe"], serde_json::json!(true));
}

#[test]
fn test_mock_annotator_needs_no_configuration() {
    let annotators = builtin_annotators().unwrap();
    let annotator = annotators
        .make_instance(LLAMA_GUARD_MOCK_UID, &RawConfig::new())
        .unwrap();
    let verdict = annotator
        .annotate_pair(&Prompt::new("hi"), &Completion::new("hello"))
        .unwrap();
    assert_eq!(verdict["is_safe"], serde_json::json!(true));
}

#[test]
fn test_unknown_uid_never_reads_config() {
    let annotators = builtin_annotators().unwrap();
    let error = annotators
        .make_instance("does-not-exist", &RawConfig::new())
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(error, RegistryError::UnknownUid(_)));
}

#[test]
fn test_known_uids_enumerate_the_catalog() {
    let annotators = builtin_annotators().unwrap();
    assert_eq!(
        annotators.known_uids(),
        vec![LLAMA_GUARD_TOGETHER_UID, LLAMA_GUARD_MOCK_UID]
    );

    let suts = builtin_suts().unwrap();
    assert_eq!(suts.known_uids(), vec![MOCK_SUT_UID]);
}

#[test]
fn test_mock_sut_responds_offline() {
    let suts = builtin_suts().unwrap();
    let sut = suts.make_instance(MOCK_SUT_UID, &RawConfig::new()).unwrap();
    let response = sut.respond(&Prompt::new("anything")).unwrap();
    assert_eq!(response.completions, vec![Completion::new("safe")]);
}
