//! Board support for the NeTV2 (Artix-7, FGG484 package).

pub mod io;
pub mod platform;
pub mod xdc;

pub use platform::{Platform, PlatformError, Programmer};
