//! Reserved header, property and global option names.

/// Exchange property holding an error caught by an error handler.
pub const EXCEPTION_CAUGHT: &str = "RelayExceptionCaught";

/// Message header carrying a file's last modified time (epoch millis or timestamp).
pub const FILE_LAST_MODIFIED: &str = "RelayFileLastModified";

/// Global option limiting how many body characters a formatter prints.
pub const LOG_DEBUG_BODY_MAX_CHARS: &str = "RelayLogDebugBodyMaxChars";
