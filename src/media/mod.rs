//! Media module for post representation and parsing.

pub mod item;
pub mod parser;
pub mod shortcode;

pub use item::{MediaResource, MediaType, Post};
pub use parser::parse_post;
pub use shortcode::Shortcode;
