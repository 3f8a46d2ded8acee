pub mod defaults;
pub mod mode;
pub mod types;

pub use defaults::{DEFAULT_LINUX_ROOT, DEFAULT_WINDOWS_ROOT, InstallLayout};
pub use mode::FileMode;
pub use types::*;
