//! Retention configuration
//!
//! The configuration is a small line-oriented language:
//!
//! ```text
//! include /etc/zfs-cleaner.d/*.conf
//!
//! plan backups {
//!     path tank/backups
//!     keep 1h for 1d      // hourly for a day
//!     keep 1d for 30d     # daily for a month
//!     keep latest 10
//!     protect initial
//! }
//! ```

mod duration;
mod parser;
mod scanner;
pub mod settings;
mod types;

pub use duration::parse_duration;
pub use parser::read_protect_file;
pub use scanner::{trim, LineScanner};
pub use settings::Settings;
pub use types::{Config, Period, Plan};
