mod common;

pub mod cavities;
pub mod channel;
pub mod fractal_dim;
pub mod fsv;
pub mod tunnel;
pub mod two_volume;
