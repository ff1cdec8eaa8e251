mod tag;
mod message;
mod messages;
mod message_parser;
mod message_reader;
mod message_builder;
mod message_error_builder;
mod errors;
mod auth_type;
mod row_description;
mod server_params;

pub mod error_codes;

pub use self::tag::{
    Tag, SSL_ALLOWED, SSL_NOT_ALLOWED, SSL_REQUEST_CODE, CANCEL_REQUEST_CODE,
    GSSENC_REQUEST_CODE, PROTOCOL_VERSION,
};
pub use self::message::Message;
pub use self::messages::{Messages, MessageIter};
pub use self::message_parser::{Header, MessageParser, HEADER_LEN};
pub use self::message_reader::MessageReader;
pub use self::message_builder::MessageBuilder;
pub use self::message_error_builder::MessageErrorBuilder;
pub use self::errors::{ErrorSeverity, ErrorFieldTag, format_fields};
pub use self::auth_type::AuthType;
pub use self::row_description::{RowDescription, FieldDescription, FormatCode};
pub use self::server_params::ServerParams;
