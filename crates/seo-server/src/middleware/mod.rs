//! Middleware layers.

pub(crate) mod headers;
