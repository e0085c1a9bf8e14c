pub mod chat;
pub mod opportunity;
pub mod plan;
pub mod transaction;
pub mod wallet;
