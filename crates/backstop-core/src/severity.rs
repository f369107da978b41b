//! Severity classification for runtime faults.
//!
//! A runtime fault carries a raw integer severity code. A static table maps
//! the known codes to human-readable labels used only for log-message
//! construction; labels are never surfaced to clients. Codes outside the
//! table render a generic label embedding the numeric code verbatim, so the
//! resulting log line is never silently empty.

use std::borrow::Cow;
use std::fmt;

/// A raw runtime-fault severity code.
///
/// # Example
///
/// ```
/// use backstop_core::Severity;
///
/// assert_eq!(Severity::USER_WARNING.label(), "user warning");
/// assert!(Severity::USER_FATAL.is_fatal());
/// assert!(!Severity::DEPRECATED.is_fatal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Severity(pub u32);

impl Severity {
    /// Fatal error.
    pub const FATAL: Self = Self(1);
    /// Warning.
    pub const WARNING: Self = Self(2);
    /// Parse error.
    pub const PARSE: Self = Self(4);
    /// Notice.
    pub const NOTICE: Self = Self(8);
    /// Core fatal error.
    pub const CORE_FATAL: Self = Self(16);
    /// Compile-time fatal error.
    pub const COMPILE_FATAL: Self = Self(64);
    /// User-raised fatal error.
    pub const USER_FATAL: Self = Self(256);
    /// User-raised warning.
    pub const USER_WARNING: Self = Self(512);
    /// User-raised notice.
    pub const USER_NOTICE: Self = Self(1024);
    /// Strict-mode notice.
    pub const STRICT: Self = Self(2048);
    /// Recoverable error.
    pub const RECOVERABLE: Self = Self(4096);
    /// Deprecation notice.
    pub const DEPRECATED: Self = Self(8192);
    /// User-raised deprecation notice.
    pub const USER_DEPRECATED: Self = Self(16384);

    /// Severities after which the process cannot continue.
    const FATAL_MASK: u32 = Self::FATAL.0
        | Self::PARSE.0
        | Self::CORE_FATAL.0
        | Self::COMPILE_FATAL.0
        | Self::USER_FATAL.0;

    /// Returns the raw severity code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Returns `true` if this severity belongs to the fatal set.
    ///
    /// A fatal termination record observed at process end is acted upon only
    /// when its severity is a member of this set.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        self.0 & Self::FATAL_MASK != 0
    }

    /// Returns the human-readable label for this severity.
    ///
    /// Codes outside the static table produce a generic label that embeds
    /// the numeric code. This function is total and has no side effects.
    #[must_use]
    pub fn label(self) -> Cow<'static, str> {
        match self.0 {
            2 => Cow::Borrowed("warning"),
            8 => Cow::Borrowed("notice"),
            256 => Cow::Borrowed("user error"),
            512 => Cow::Borrowed("user warning"),
            1024 => Cow::Borrowed("user notice"),
            2048 => Cow::Borrowed("strict notice"),
            4096 => Cow::Borrowed("recoverable error"),
            8192 => Cow::Borrowed("deprecation"),
            16384 => Cow::Borrowed("user deprecation"),
            code => Cow::Owned(format!("Unknown error level, code of {code} passed")),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
