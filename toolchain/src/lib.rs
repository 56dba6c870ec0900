pub mod template;
mod toolchain;

pub use template::{BuildCommand, BuildCommands, TemplateError, extend_build_template};
pub use toolchain::Toolchain;
