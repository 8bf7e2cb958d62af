pub(crate) mod dirty;
