pub mod constants;
pub mod input;
pub mod keys;
pub mod layout;
pub mod render;
pub mod scroll;
