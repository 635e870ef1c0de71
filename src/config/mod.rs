mod loader;
mod types;

pub use loader::TARGET_ENV;
pub use types::WrapperConfig;
