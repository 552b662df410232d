pub mod assign;
pub mod confirm;
