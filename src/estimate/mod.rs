//! Estimate request pipeline: read the form, validate it, turn it into a
//! flat record and post it to the sheet endpoint.

pub mod context;
pub mod dom;
pub mod draft;
pub mod fields;
pub mod input_format;
pub mod pipeline;
pub mod record;
pub mod transport;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use context::ClientContext;
pub use dom::{DomForm, DomSurface};
pub use draft::{Draft, DraftStore, LocalStorageDrafts};
pub use fields::FieldAccessor;
pub use pipeline::{EstimatePipeline, SubmitOutcome, SubmitState};
pub use transport::FetchTransport;
