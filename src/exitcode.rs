/// Standard Unix exit codes for the linklocker CLI.
///
/// These codes follow the BSD convention where possible and provide
/// meaningful feedback about the type of error that occurred.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, missing required parameters, etc.
pub const USAGE: i32 = 64;

/// Input data was rejected, e.g. a link without title or an unknown id
pub const DATAERR: i32 = 65;

/// Internal software error, e.g. the database could not be opened
pub const SOFTWARE: i32 = 70;

/// Not signed in, or the credentials were rejected
pub const NOPERM: i32 = 77;

/// Operation was cancelled by user (typically Ctrl+C or a declined prompt)
pub const CANCEL: i32 = 130;
