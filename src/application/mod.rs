pub mod advice;
pub mod content;
pub mod creator;
pub mod events;
pub mod ledger;
pub mod refresh;
pub mod runtime;
pub mod session;
