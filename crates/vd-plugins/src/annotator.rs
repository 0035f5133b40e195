//! Annotator capability contracts.
//!
//! [`Annotator`] is the object-safe surface the registry hands out:
//! a uid plus the full annotation pipeline with the result erased to
//! JSON. [`CompletionAnnotator`] is the richer, typed protocol
//! concrete annotators implement; a blanket impl derives the erased
//! surface from it.

use serde::Serialize;

use crate::error::PluginError;
use crate::prompt::{Completion, Prompt};

/// Object-safe contract for all annotators.
pub trait Annotator: Send + Sync {
    /// Stable identifier this annotator was registered under.
    fn uid(&self) -> &str;

    /// Run the full translate → annotate → translate pipeline for one
    /// prompt+completion pair, reporting the annotation in serialized
    /// form.
    fn annotate_pair(
        &self,
        prompt: &Prompt,
        completion: &Completion,
    ) -> Result<serde_json::Value, PluginError>;
}

/// Annotator that examines a single prompt+completion pair at a time.
///
/// Implementations report whatever annotation type they want, as long
/// as it serializes. Not object-safe; typed call sites use it
/// directly, and the blanket impl below exposes it as a plain
/// [`Annotator`] for registry use.
pub trait CompletionAnnotator: Send + Sync {
    /// Native request shape of the backing provider.
    type Request;
    /// Raw response shape of the backing provider.
    type Response;
    /// Annotation read by the surrounding evaluation.
    type Annotation: Serialize;

    /// Stable identifier this annotator was registered under.
    fn uid(&self) -> &str;

    /// Convert the pair into the native request shape.
    fn translate_request(&self, prompt: &Prompt, completion: &Completion) -> Self::Request;

    /// Perform annotation and return the raw provider response.
    fn annotate(&self, request: &Self::Request) -> Result<Self::Response, PluginError>;

    /// Convert the raw response into the annotation.
    fn translate_response(
        &self,
        request: &Self::Request,
        response: &Self::Response,
    ) -> Result<Self::Annotation, PluginError>;
}

impl<A: CompletionAnnotator> Annotator for A {
    fn uid(&self) -> &str {
        CompletionAnnotator::uid(self)
    }

    fn annotate_pair(
        &self,
        prompt: &Prompt,
        completion: &Completion,
    ) -> Result<serde_json::Value, PluginError> {
        let request = self.translate_request(prompt, completion);
        let response = self.annotate(&request)?;
        let annotation = self.translate_response(&request, &response)?;
        Ok(serde_json::to_value(annotation)?)
    }
}
