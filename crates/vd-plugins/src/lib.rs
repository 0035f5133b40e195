//! Verdict plugin contracts and built-in plugins.
//!
//! This crate provides:
//! - Prompt/completion data shapes exchanged with plugins
//! - The annotator and SUT capability traits
//! - A Llama-Guard-style safety annotator with mock and
//!   Together-backed providers
//! - Explicitly-constructed catalogs of the built-in plugins
//!
//! Plugins are opaque to the registry machinery: all it sees is a uid
//! and a deferred constructor. Evaluation logic runs only after
//! successful construction, through the capability traits here.

pub mod annotator;
pub mod builtin;
pub mod error;
pub mod llama_guard;
pub mod prompt;
pub mod sut;

pub use annotator::{Annotator, CompletionAnnotator};
pub use builtin::{
    builtin_annotators, builtin_suts, LLAMA_GUARD_MOCK_UID, LLAMA_GUARD_TOGETHER_UID, MOCK_SUT_UID,
};
pub use error::PluginError;
pub use llama_guard::{LlamaGuardAnnotator, MockProvider, SafetyVerdict, TogetherProvider};
pub use prompt::{Completion, Prompt, SutResponse};
pub use sut::{MockLlamaGuardSut, PromptResponseSut, Sut};
