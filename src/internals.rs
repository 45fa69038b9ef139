use std::time::Duration;

/// Default timeout for waiting on a register read reply from the sign.
pub const SIGN_DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Number of text files (labels `A`..=`E`) allocated by the default memory map.
pub const SIGN_DEFAULT_TEXT_FILES: u8 = 5;

/// Capacity in bytes of each text file in the default memory map.
pub const SIGN_DEFAULT_TEXT_FILE_SIZE: u16 = 0x0100;

/// Number of string files (labels `1`..=`10`) allocated by the default memory map.
pub const SIGN_DEFAULT_STRING_FILES: u8 = 10;

/// Capacity in bytes of each string file in the default memory map.
pub const SIGN_DEFAULT_STRING_FILE_SIZE: u16 = 0x007D;
