//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod featured;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod related;
pub(crate) mod sale;
pub(crate) mod update;
