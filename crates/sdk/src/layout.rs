//! Log line layout
//!
//! Console and file destinations render the same columns:
//! `time | LEVEL | thread | target | message`. The file destination uses the
//! full date in the time column.

/// Time column format for the console destination
pub const CONSOLE_TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Time column format for the file destination
pub const FILE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Date stamp used in log file names (`<prefix>_<yyMMdd>.log`)
pub const FILE_DATE_FORMAT: &str = "%y%m%d";

/// Extension of log files
pub const LOG_FILE_EXTENSION: &str = "log";

/// Default log file name prefix
pub const DEFAULT_LOG_PREFIX: &str = "mufw";
