pub mod brief;
pub mod prompt;
