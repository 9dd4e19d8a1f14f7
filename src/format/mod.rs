//! Human-readable output: relative times and blame messages

pub mod message;
pub mod relative_time;

pub use message::{DEFAULT_INLINE_TEMPLATE, DEFAULT_STATUS_TEMPLATE, MessageFormatter, truncate};
pub use relative_time::{
    English, Numeric, RelativeTime, RelativeTimeLocale, RelativeTimeUnit, format_relative,
    format_relative_to_now, now_seconds, relative_time,
};
