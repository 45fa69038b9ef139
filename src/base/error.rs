use std::error;
use std::fmt;
use std::io;

/// Represents errors that can occur while talking to a sign.
#[derive(Debug)]
pub enum Error {
    /// No reply arrived from the sign before the timeout expired.
    OperationTimeout,

    /// An argument cannot be represented on the wire (e.g. a non-ASCII file label).
    InvalidArgument { description: String },

    /// The bytes being decoded are not a well-formed packet. Contains a description of the problem.
    ProtocolError { description: String },

    /// An I/O error occurred while communicating with the underlying stream (e.g., serial port).
    IoError(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OperationTimeout => write!(f, "operation timeout"),
            Error::InvalidArgument { description } => {
                write!(f, "invalid argument: {}", description)
            }
            Error::ProtocolError { description } => write!(f, "protocol error: {}", description),
            Error::IoError(err) => write!(f, "io error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IoError(err)
    }
}

/// A specialized `Result` type for sign operations.
pub type Result<T> = std::result::Result<T, Error>;
