pub mod colors;
pub mod details;
pub mod list;
