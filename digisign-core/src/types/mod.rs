mod amount;
mod common;
mod params;
mod payload;
mod trade;

pub use amount::*;
pub use common::*;
pub use params::*;
pub use payload::*;
pub use trade::*;
