mod category;
mod export;
mod movement;

pub use self::category::*;
pub use self::export::*;
pub use self::movement::*;
