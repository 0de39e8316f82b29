//! Process exit codes, values taken from BSD sysexits.h

/// Missing entry file, bad flags, refusing to overwrite a config file
pub const USAGE: i32 = 64;

/// Tree could not be rendered
pub const SOFTWARE: i32 = 70;

/// Config template could not be written
pub const CANTCREAT: i32 = 73;

/// A source file opened but could not be read
pub const IOERR: i32 = 74;

/// Unparsable config file or env override
pub const CONFIG: i32 = 78;
