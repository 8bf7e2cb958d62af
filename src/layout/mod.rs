pub(crate) mod config;
pub(crate) mod element;
pub(crate) mod group;
pub(crate) mod solver;
pub(crate) mod tracker;
