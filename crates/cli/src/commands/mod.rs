//! CLI command implementations.

mod export;
mod info;
mod mark;
mod validate;

pub use export::run_export;
pub use info::run_info;
pub use mark::run_mark;
pub use validate::run_validate;
