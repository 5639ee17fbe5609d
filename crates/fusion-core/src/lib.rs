pub mod consts;
pub mod correspondence;
pub mod error;
pub mod registration;
pub mod render;
pub mod transform;
