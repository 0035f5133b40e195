//! Catalogs of the built-in plugins.
//!
//! Registries are explicitly constructed and returned by value; there
//! is no process-global table. Populate once at startup, pass by
//! reference afterwards.

use vd_registry::{InstanceFactory, RegistryError};

use crate::annotator::Annotator;
use crate::llama_guard::{LlamaGuardAnnotator, MockProvider, TogetherProvider};
use crate::sut::{MockLlamaGuardSut, Sut};

/// Uid of the mock guard annotator (no configuration required).
pub const LLAMA_GUARD_MOCK_UID: &str = "llama-guard-mock";

/// Uid of the Together-backed guard annotator.
pub const LLAMA_GUARD_TOGETHER_UID: &str = "llama-guard-2";

/// Uid of the offline mock SUT.
pub const MOCK_SUT_UID: &str = "llama-guard-2-mock";

/// Catalog of built-in annotators.
pub fn builtin_annotators() -> Result<InstanceFactory<dyn Annotator>, RegistryError> {
    let mut annotators: InstanceFactory<dyn Annotator> = InstanceFactory::new();

    annotators.register(LLAMA_GUARD_MOCK_UID, |_raw| {
        Ok(Box::new(LlamaGuardAnnotator::new(
            LLAMA_GUARD_MOCK_UID,
            MockProvider::new(),
        )) as Box<dyn Annotator>)
    })?;

    annotators.register_injected::<TogetherProvider, _>(LLAMA_GUARD_TOGETHER_UID, |provider| {
        Box::new(LlamaGuardAnnotator::new(LLAMA_GUARD_TOGETHER_UID, provider))
            as Box<dyn Annotator>
    })?;

    Ok(annotators)
}

/// Catalog of built-in systems under test.
pub fn builtin_suts() -> Result<InstanceFactory<dyn Sut>, RegistryError> {
    let mut suts: InstanceFactory<dyn Sut> = InstanceFactory::new();

    suts.register(MOCK_SUT_UID, |_raw| {
        Ok(Box::new(MockLlamaGuardSut::new(MOCK_SUT_UID)) as Box<dyn Sut>)
    })?;

    Ok(suts)
}
