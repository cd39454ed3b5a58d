#![forbid(unsafe_code)]

//! Opt-in stderr tracing of form activity.
//!
//! Set `CACTAT_DEBUG_TRACE=1` to print every submit and panel toggle to stderr
//! with a millisecond timestamp, independent of any `tracing` subscriber. The
//! switch is read once; afterwards the check is a single bool load.
//!
//! ```bash
//! CACTAT_DEBUG_TRACE=1 cargo run -p cactat-harness
//! ```

use std::sync::LazyLock;
use std::time::Instant;

/// Environment variable that enables debug tracing.
pub const ENV_DEBUG_TRACE: &str = "CACTAT_DEBUG_TRACE";

static DEBUG_TRACE_ENABLED: LazyLock<bool> =
    LazyLock::new(|| std::env::var(ENV_DEBUG_TRACE).is_ok_and(|v| flag_enabled(&v)));

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

fn flag_enabled(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Check if debug tracing is enabled.
#[inline]
pub fn is_enabled() -> bool {
    *DEBUG_TRACE_ENABLED
}

/// Milliseconds since the first trace call.
#[inline]
pub fn elapsed_ms() -> u64 {
    START_TIME.elapsed().as_millis() as u64
}

/// Print a timestamped line to stderr when `CACTAT_DEBUG_TRACE` is set.
///
/// ```ignore
/// debug_trace!("submit outcome={:?}", outcome);
/// ```
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if $crate::debug_trace::is_enabled() {
            eprintln!(
                "[CACTAT {:>8}ms] {}",
                $crate::debug_trace::elapsed_ms(),
                format_args!($($arg)*)
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert!(flag_enabled("1"));
        assert!(flag_enabled("true"));
        assert!(flag_enabled("True"));
        assert!(!flag_enabled("0"));
        assert!(!flag_enabled("yes"));
        assert!(!flag_enabled(""));
    }

    #[test]
    fn elapsed_ms_is_monotonic() {
        let t1 = elapsed_ms();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(elapsed_ms() >= t1);
    }
}
