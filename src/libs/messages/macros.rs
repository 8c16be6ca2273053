//! Convenient macros for application messaging and logging.
//!
//! The macros route output depending on debug mode: when `AIMTRACK_DEBUG` or
//! `RUST_LOG` is set, messages go through `tracing`; otherwise they are
//! printed to stdout/stderr.
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**: General message display
//! - **`msg_success!`**: Success notifications with ✅ prefix
//! - **`msg_info!`**: Informational messages with ℹ️ prefix
//! - **`msg_warning!`**: Warning messages with ⚠️ prefix
//! - **`msg_error!`**: Error messages with ❌ prefix (stderr)
//! - **`msg_debug!`**: Debug-only messages with 🔍 prefix
//! - **`msg_error_anyhow!`**: `anyhow::Error` from a message
//!
//! ```rust
//! use aimtrack::{msg_info, msg_success};
//! use aimtrack::libs::messages::Message;
//!
//! msg_success!(Message::TaskCreated("1w6ts".to_string()));
//! msg_info!(Message::NoTasksFound, true);
//! ```

use std::sync::OnceLock;

/// Cached result of debug mode detection.
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Checks if debug mode is enabled, caching the answer for the process lifetime.
///
/// Debug mode is on when either `AIMTRACK_DEBUG` or `RUST_LOG` is set.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("AIMTRACK_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a general message with automatic debug mode routing.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

/// Prints an error message with ❌ prefix.
///
/// In normal mode the message goes to stderr so that report output piped
/// elsewhere stays clean.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

/// Prints a warning message with ⚠️ prefix.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️ {}\n", $msg);
        } else {
            println!("\n⚠️ {}\n", $msg);
        }
    };
}

/// Prints an informational message with ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Debug-only message display with 🔍 prefix. Suppressed in normal mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Creates an `anyhow::Error` from a message with ❌ prefix.
///
/// ```rust
/// use aimtrack::{msg_error_anyhow, libs::messages::Message};
///
/// let error = msg_error_anyhow!(Message::PlaylistNotFound("warmup".to_string()));
/// assert!(error.to_string().contains("warmup"));
/// ```
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}
