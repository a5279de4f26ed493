pub mod checker;
pub mod components;
pub mod document;
pub mod error;
pub mod ext;
pub mod info;
pub mod link;
pub mod media;
pub mod parameter;
pub mod paths;
pub mod refs;
pub mod response;
pub mod scalars;
pub mod schema;
pub mod security;
pub mod server;
mod validate;

pub use crate::validate::{Diagnostic, ValidationOptions};
