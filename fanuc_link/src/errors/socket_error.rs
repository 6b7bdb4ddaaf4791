use int_enum::IntEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// Socket failure codes surfaced by the link.
///
/// Values follow BSD errno numbering. Anything the table does not know
/// collapses into [`SocketErrorCode::Other`].
#[repr(i32)]
#[derive(Debug, Serialize, Deserialize, IntEnum, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketErrorCode {
    Interrupted = 4,
    BadFileHandle = 9,
    OutOfMemory = 12,
    PermissionDenied = 13,
    BadAddress = 14,
    InvalidArgument = 22,
    TooManyOpenFiles = 24,
    WouldBlock = 35,
    InProgress = 36,
    AlreadyInProgress = 37,
    NotASocket = 38,
    DestinationRequired = 39,
    MessageTooLong = 40,
    WrongProtocolType = 41,
    BadProtocolOption = 42,
    ProtocolNotSupported = 43,
    SocketTypeNotSupported = 44,
    OperationNotSupported = 45,
    ProtocolFamilyNotSupported = 46,
    AddressFamilyNotSupported = 47,
    AddressInUse = 48,
    AddressNotAvailable = 49,
    NetworkDown = 50,
    NetworkUnreachable = 51,
    NetworkReset = 52,
    ConnectionAborted = 53,
    ConnectionReset = 54,
    NoBufferSpace = 55,
    AlreadyConnected = 56,
    NotConnected = 57,
    Shutdown = 58,
    TooManyReferences = 59,
    TimedOut = 60,
    ConnectionRefused = 61,
    NameTooLong = 63,
    HostDown = 64,
    HostUnreachable = 65,
    Other = 100000,
}

impl SocketErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            SocketErrorCode::Interrupted => "A blocking operation was interrupted.",
            SocketErrorCode::BadFileHandle => "The file handle supplied is not valid.",
            SocketErrorCode::OutOfMemory => "Insufficient memory available.",
            SocketErrorCode::PermissionDenied => "An attempt was made to access a socket in a way forbidden by its access permissions.",
            SocketErrorCode::BadAddress => "The system detected an invalid pointer address.",
            SocketErrorCode::InvalidArgument => "An invalid argument was supplied.",
            SocketErrorCode::TooManyOpenFiles => "Too many open sockets.",
            SocketErrorCode::WouldBlock => "A non-blocking socket operation could not be completed immediately.",
            SocketErrorCode::InProgress => "A blocking operation is currently executing.",
            SocketErrorCode::AlreadyInProgress => "An operation was attempted on a non-blocking socket that already had an operation in progress.",
            SocketErrorCode::NotASocket => "An operation was attempted on something that is not a socket.",
            SocketErrorCode::DestinationRequired => "A required address was omitted from an operation on a socket.",
            SocketErrorCode::MessageTooLong => "A message sent on a datagram socket was larger than the internal message buffer.",
            SocketErrorCode::WrongProtocolType => "A protocol was specified that does not support the semantics of the socket type requested.",
            SocketErrorCode::BadProtocolOption => "An unknown, invalid, or unsupported option or level was specified.",
            SocketErrorCode::ProtocolNotSupported => "The requested protocol has not been configured into the system.",
            SocketErrorCode::SocketTypeNotSupported => "The support for the specified socket type does not exist in this address family.",
            SocketErrorCode::OperationNotSupported => "The attempted operation is not supported for the type of object referenced.",
            SocketErrorCode::ProtocolFamilyNotSupported => "The protocol family has not been configured into the system.",
            SocketErrorCode::AddressFamilyNotSupported => "An address incompatible with the requested protocol was used.",
            SocketErrorCode::AddressInUse => "Only one usage of each socket address is normally permitted.",
            SocketErrorCode::AddressNotAvailable => "The requested address is not valid in its context.",
            SocketErrorCode::NetworkDown => "A socket operation encountered a dead network.",
            SocketErrorCode::NetworkUnreachable => "A socket operation was attempted to an unreachable network.",
            SocketErrorCode::NetworkReset => "The connection has been broken due to keep-alive activity detecting a failure.",
            SocketErrorCode::ConnectionAborted => "An established connection was aborted by the software in your host machine.",
            SocketErrorCode::ConnectionReset => "An existing connection was forcibly closed by the remote host.",
            SocketErrorCode::NoBufferSpace => "No buffer space available.",
            SocketErrorCode::AlreadyConnected => "A connect request was made on an already connected socket.",
            SocketErrorCode::NotConnected => "The socket is not connected.",
            SocketErrorCode::Shutdown => "The socket had already been shut down in that direction.",
            SocketErrorCode::TooManyReferences => "Too many references to some kernel object.",
            SocketErrorCode::TimedOut => "The connected party did not properly respond after a period of time.",
            SocketErrorCode::ConnectionRefused => "No connection could be made because the target machine actively refused it.",
            SocketErrorCode::NameTooLong => "Name component or name was too long.",
            SocketErrorCode::HostDown => "A socket operation failed because the destination host was down.",
            SocketErrorCode::HostUnreachable => "A socket operation was attempted to an unreachable host.",
            SocketErrorCode::Other => "Some other socket error occurred.",
        }
    }

    pub fn code(self) -> i32 {
        i32::from(self)
    }

    pub fn from_code(code: i32) -> Self {
        Self::try_from(code).unwrap_or(SocketErrorCode::Other)
    }

    /// Classifies an I/O error by kind. Raw errno values are platform specific
    /// and are not consulted.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => SocketErrorCode::ConnectionRefused,
            io::ErrorKind::ConnectionReset => SocketErrorCode::ConnectionReset,
            io::ErrorKind::ConnectionAborted | io::ErrorKind::UnexpectedEof => {
                SocketErrorCode::ConnectionAborted
            }
            io::ErrorKind::NotConnected => SocketErrorCode::NotConnected,
            io::ErrorKind::BrokenPipe => SocketErrorCode::Shutdown,
            io::ErrorKind::TimedOut => SocketErrorCode::TimedOut,
            io::ErrorKind::AddrInUse => SocketErrorCode::AddressInUse,
            io::ErrorKind::AddrNotAvailable => SocketErrorCode::AddressNotAvailable,
            io::ErrorKind::HostUnreachable => SocketErrorCode::HostUnreachable,
            io::ErrorKind::NetworkUnreachable => SocketErrorCode::NetworkUnreachable,
            io::ErrorKind::NetworkDown => SocketErrorCode::NetworkDown,
            io::ErrorKind::PermissionDenied => SocketErrorCode::PermissionDenied,
            io::ErrorKind::WouldBlock => SocketErrorCode::WouldBlock,
            io::ErrorKind::InvalidInput => SocketErrorCode::InvalidArgument,
            io::ErrorKind::Interrupted => SocketErrorCode::Interrupted,
            io::ErrorKind::OutOfMemory => SocketErrorCode::OutOfMemory,
            io::ErrorKind::Unsupported => SocketErrorCode::OperationNotSupported,
            _ => SocketErrorCode::Other,
        }
    }
}

impl fmt::Display for SocketErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}:\t{}", self.code(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back_to_other() {
        assert_eq!(SocketErrorCode::from_code(61), SocketErrorCode::ConnectionRefused);
        assert_eq!(SocketErrorCode::from_code(-3), SocketErrorCode::Other);
        assert_eq!(SocketErrorCode::from_code(7), SocketErrorCode::Other);
        assert_eq!(SocketErrorCode::Other.code(), 100000);
        assert_eq!(SocketErrorCode::Other.message(), "Some other socket error occurred.");
    }

    #[test]
    fn io_kinds_map_to_categories() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(SocketErrorCode::from_io(&refused), SocketErrorCode::ConnectionRefused);

        let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        assert_eq!(SocketErrorCode::from_io(&eof), SocketErrorCode::ConnectionAborted);

        let odd = io::Error::new(io::ErrorKind::InvalidData, "garbage");
        assert_eq!(SocketErrorCode::from_io(&odd), SocketErrorCode::Other);
    }

    #[test]
    fn display_carries_code_and_message() {
        let text = SocketErrorCode::TimedOut.to_string();
        assert!(text.starts_with("Error 60:"));
        assert!(text.contains("did not properly respond"));
    }
}
