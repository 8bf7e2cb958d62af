pub(crate) mod cache;
pub(crate) mod directive;
pub(crate) mod ease;
pub(crate) mod engine;
