pub mod amount;
pub mod notice;
pub mod tool;
