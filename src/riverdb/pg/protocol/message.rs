use crate::riverdb::pg::protocol::Tag;
use crate::riverdb::pg::protocol::message_parser::Header;
use crate::riverdb::pg::protocol::MessageReader;

/// A single Postgres wire protocol message, borrowed from a `Messages` buffer.
///
/// `data` is the complete on-wire representation, tag byte included when the message is
/// tagged. Untagged messages (StartupMessage/SSLRequest/CancelRequest/GSSENCRequest) have
/// no tag byte; `body_start()` accounts for this.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    header: Header,
    data: &'a [u8],
}

impl<'a> Message<'a> {
    pub(crate) fn new(header: Header, data: &'a [u8]) -> Self {
        debug_assert_eq!(data.len() as u32, header.len());
        Message { header, data }
    }

    pub fn tag(&self) -> Tag {
        self.header.tag
    }

    pub fn header(&self) -> Header {
        self.header
    }

    /// Length of the complete message, tag byte included if present.
    pub fn len(&self) -> u32 {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset of the payload, past the tag byte (if any) and the 4-byte length field.
    pub fn body_start(&self) -> u32 {
        if self.header.tag == Tag::UNTAGGED { 4 } else { 5 }
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// The payload bytes, excluding tag and length field.
    pub fn body(&self) -> &'a [u8] {
        &self.data[self.body_start() as usize..]
    }

    pub fn reader(&self) -> MessageReader<'a> {
        MessageReader::new(self.data, self.body_start())
    }
}

impl<'a> std::fmt::Display for Message<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}B)", self.tag(), self.len())
    }
}

impl<'a> std::fmt::Debug for Message<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
