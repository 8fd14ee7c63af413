mod export_handlers;
mod webhook_handlers;

pub use self::export_handlers::*;
pub use self::webhook_handlers::*;
