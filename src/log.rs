use std::env;

use once_cell::sync::Lazy;

pub static DEBUG_ENABLED: Lazy<bool> = Lazy::new(|| {
    env::var("CLIPFORM_DEBUG").map_or(false, |log_level| log_level.eq("true") || log_level.eq("1"))
});

/// Builds a diagnostic message, appending the details only when debug is enabled.
///
/// # Arguments
///
/// * `message` - The main message.
/// * `details` - Additional details shown in debug mode.
///
/// # Returns
///
/// A formatted string containing the message and, in debug mode, the details.
pub fn debug_message<M, D>(message: M, details: D) -> String
where
    M: AsRef<str>,
    D: AsRef<str>,
{
    if *DEBUG_ENABLED {
        format!("{}{}", message.as_ref(), details.as_ref())
    } else {
        message.as_ref().to_string()
    }
}

/// Prints a debug diagnostic to stderr when `CLIPFORM_DEBUG` is set.
///
/// # Examples
///
/// ```
/// use clipform::debug;
///
/// debug!("Pipeline finished");
/// debug!("Applied {} transformations to {} lines", 3, 12);
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:expr) => {
        if *$crate::log::DEBUG_ENABLED {
            eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!("{}", $fmt)));
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if *$crate::log::DEBUG_ENABLED {
            eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!($fmt, $($arg)*)));
        }
    };
}

/// Prints a warning diagnostic to stderr.
///
/// Warnings report recoverable conditions (a missing capture slot, a line that
/// is not valid JSON) that leave the text unchanged without aborting.
#[macro_export]
macro_rules! warn {
    ($fmt:expr) => {
        eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!("WARNING: {}", $fmt)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!("WARNING: {}", format!($fmt, $($arg)*))))
    };
}
