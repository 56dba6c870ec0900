pub mod io;
pub mod pll;
pub mod soc;
pub mod units;
pub mod util;
