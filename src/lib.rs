pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod storage;
pub mod wordlist;

pub use config::Config;
pub use controller::SessionController;
pub use error::{Error, Result};
