pub(crate) mod common;
mod profile;
