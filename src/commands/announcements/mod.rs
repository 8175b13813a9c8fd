
pub mod announce;
pub mod embed;
