use std::fmt::{Display, Formatter, Debug};

use crate::riverdb::{Error, Result};

/// Server's one-byte reply to an SSLRequest: TLS is available.
pub const SSL_ALLOWED: u8 = b'S';
/// Server's one-byte reply to an SSLRequest: fall back to plaintext.
pub const SSL_NOT_ALLOWED: u8 = b'N';
/// Magic "protocol version" value that identifies an SSLRequest StartupMessage.
pub const SSL_REQUEST_CODE: i32 = 80877103;
/// Magic "protocol version" value that identifies a CancelRequest StartupMessage.
pub const CANCEL_REQUEST_CODE: i32 = 80877102;
/// Magic "protocol version" value that identifies a GSSENCRequest StartupMessage.
pub const GSSENC_REQUEST_CODE: i32 = 80877104;
/// Protocol version 3.0, sent as the first 4 bytes of a normal StartupMessage body.
pub const PROTOCOL_VERSION: i32 = 0x00030000;

/// Tag identifies a Postgres wire protocol message's type. Many byte values are shared
/// between unrelated frontend and backend messages (protocol direction disambiguates them).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tag(u8);

impl Tag {
    pub const UNTAGGED: Tag = Tag(0);

    // Frontend (client) messages
    pub const BIND: Tag = Tag::new_unchecked(b'B');
    pub const CLOSE: Tag = Tag::new_unchecked(b'C');
    pub const COPY_FAIL: Tag = Tag::new_unchecked(b'f');
    pub const DESCRIBE: Tag = Tag::new_unchecked(b'D');
    pub const EXECUTE: Tag = Tag::new_unchecked(b'E');
    pub const FLUSH: Tag = Tag::new_unchecked(b'F');
    pub const PARSE: Tag = Tag::new_unchecked(b'P');
    /// Also used for SASLInitialResponse, SASLResponse, and GSSResponse.
    pub const PASSWORD_MESSAGE: Tag = Tag::new_unchecked(b'p');
    pub const QUERY: Tag = Tag::new_unchecked(b'Q');
    pub const SYNC: Tag = Tag::new_unchecked(b'S');
    pub const TERMINATE: Tag = Tag::new_unchecked(b'X');

    // Frontend + backend (bidirectional)
    pub const COPY_DATA: Tag = Tag::new_unchecked(b'd');
    pub const COPY_DONE: Tag = Tag::new_unchecked(b'c');

    // Backend messages
    /// The "Authentication" message class; the sub-code is the first 4 payload bytes.
    pub const AUTHENTICATION: Tag = Tag::new_unchecked(b'R');
    pub const BACKEND_KEY_DATA: Tag = Tag::new_unchecked(b'K');
    pub const BIND_COMPLETE: Tag = Tag::new_unchecked(b'2');
    pub const CLOSE_COMPLETE: Tag = Tag::new_unchecked(b'3');
    pub const COMMAND_COMPLETE: Tag = Tag::new_unchecked(b'C');
    pub const COPY_IN_RESPONSE: Tag = Tag::new_unchecked(b'G');
    pub const COPY_OUT_RESPONSE: Tag = Tag::new_unchecked(b'H');
    pub const COPY_BOTH_RESPONSE: Tag = Tag::new_unchecked(b'W');
    pub const DATA_ROW: Tag = Tag::new_unchecked(b'D');
    pub const EMPTY_QUERY_RESPONSE: Tag = Tag::new_unchecked(b'I');
    pub const FUNCTION_CALL_RESPONSE: Tag = Tag::new_unchecked(b'V');
    pub const NEGOTIATE_PROTOCOL_VERSION: Tag = Tag::new_unchecked(b'v');
    pub const NO_DATA: Tag = Tag::new_unchecked(b'n');
    pub const PARAMETER_DESCRIPTION: Tag = Tag::new_unchecked(b't');
    pub const PARSE_COMPLETE: Tag = Tag::new_unchecked(b'1');
    pub const PORTAL_SUSPENDED: Tag = Tag::new_unchecked(b's');
    pub const READY_FOR_QUERY: Tag = Tag::new_unchecked(b'Z');
    pub const ROW_DESCRIPTION: Tag = Tag::new_unchecked(b'T');
    pub const ERROR_RESPONSE: Tag = Tag::new_unchecked(b'E');
    pub const PARAMETER_STATUS: Tag = Tag::new_unchecked(b'S');
    pub const NOTICE_RESPONSE: Tag = Tag::new_unchecked(b'N');
    pub const NOTIFICATION_RESPONSE: Tag = Tag::new_unchecked(b'A');

    pub fn new(b: u8) -> Result<Self> {
        if let Some(name) = TAG_NAMES.get(b as usize) {
            if !name.is_empty() {
                return Ok(Tag(b));
            }
        }
        Err(Error::protocol(format!("unknown message tag '{}'", b as char)))
    }

    pub const fn new_unchecked(b: u8) -> Self {
        Tag(b)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

static TAG_NAMES: [&str; ('z' as usize) + 1] = {
    let mut names = [""; ('z' as usize) + 1];
    names[b'1' as usize] = "ParseComplete";
    names[b'2' as usize] = "BindComplete";
    names[b'3' as usize] = "CloseComplete";
    names[b'A' as usize] = "NotificationResponse";
    names[b'B' as usize] = "Bind";
    names[b'C' as usize] = "Close/CommandComplete";
    names[b'D' as usize] = "Describe/DataRow";
    names[b'E' as usize] = "Execute/ErrorResponse";
    names[b'F' as usize] = "Flush";
    names[b'G' as usize] = "CopyInResponse";
    names[b'H' as usize] = "CopyOutResponse";
    names[b'I' as usize] = "EmptyQueryResponse";
    names[b'K' as usize] = "BackendKeyData";
    names[b'N' as usize] = "NoticeResponse";
    names[b'P' as usize] = "Parse";
    names[b'Q' as usize] = "Query";
    names[b'R' as usize] = "Authentication";
    names[b'S' as usize] = "ParameterStatus/Sync";
    names[b'T' as usize] = "RowDescription";
    names[b'V' as usize] = "FunctionCallResponse";
    names[b'W' as usize] = "CopyBothResponse";
    names[b'X' as usize] = "Terminate";
    names[b'Z' as usize] = "ReadyForQuery";
    names[b'c' as usize] = "CopyDone";
    names[b'd' as usize] = "CopyData";
    names[b'f' as usize] = "CopyFail";
    names[b'n' as usize] = "NoData";
    names[b'p' as usize] = "PasswordMessage";
    names[b's' as usize] = "PortalSuspended";
    names[b't' as usize] = "ParameterDescription";
    names[b'v' as usize] = "NegotiateProtocolVersion";
    names
};

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return f.write_str("Untagged");
        }
        if let Some(name) = TAG_NAMES.get(self.0 as usize) {
            if !name.is_empty() {
                return f.write_str(name);
            }
        }
        write!(f, "Unknown('{}')", self.0 as char)
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_roundtrip() {
        for &b in &[b'R', b'K', b'S', b'Z', b'T', b'D', b'C', b'G', b'H', b'W', b'E', b'N'] {
            let tag = Tag::new(b).expect("known tag");
            assert_eq!(tag.as_u8(), b);
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        assert!(Tag::new(0x01).is_err());
    }
}
