pub mod user;

pub use user::{load_user_config, UserConfig};
