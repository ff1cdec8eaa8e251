use tracing::warn;

use crate::riverdb::pg::protocol::{Message, Tag};

/// Tracks where a command's reply is within its overall lifecycle. A reply always starts
/// at `Start`; whether it moves through `RsetColdef`/`RsetRows` or `LoadData` depends on
/// which backend messages show up before `ReadyForQuery` completes it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReplyState {
    Start,
    RsetColdef,
    RsetRows,
    LoadData,
    Done,
}

impl Default for ReplyState {
    fn default() -> Self {
        ReplyState::Start
    }
}

/// Accumulates the backend's response to a single command: row/field counts, whether it
/// completed successfully, and (on failure) the error's SQLSTATE and message. There is
/// only ever one "current" Reply per backend connection at a time; TrackedQuery (see
/// tracked_query.rs) is what lets multiple in-flight commands take turns being current.
#[derive(Debug, Default, Clone)]
pub struct Reply {
    pub state: ReplyState,
    /// Tag of the command this reply belongs to (e.g. the originating TrackedQuery's tag),
    /// seeded when the reply becomes current. Empty if the command wasn't tracked.
    pub command: &'static str,
    pub rows: u32,
    pub field_count: u16,
    pub warnings: u32,
    pub bytes_in: u32,
    pub bytes_out: u32,
    pub is_ok: bool,
    pub error: Option<(String, String)>, // (sqlstate, message)
}

impl Reply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_done(&self) -> bool {
        self.state == ReplyState::Done
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Folds one backend message into this reply's running state, per the per-tag table:
    /// RowDescription starts a result set and records its field count, DataRow counts
    /// rows, CopyInResponse switches to streaming LOAD DATA, ErrorResponse/NoticeResponse
    /// extract SQLSTATE/message, and ReadyForQuery finalizes the reply.
    pub fn process_message(&mut self, msg: &Message) {
        self.bytes_out += msg.len();
        match msg.tag() {
            Tag::ROW_DESCRIPTION => {
                self.state = ReplyState::RsetColdef;
                let mut r = msg.reader();
                self.field_count = r.read_i16() as u16;
            }
            Tag::DATA_ROW => {
                self.state = ReplyState::RsetRows;
                self.rows += 1;
            }
            Tag::COPY_IN_RESPONSE => {
                self.state = ReplyState::LoadData;
            }
            Tag::NOTICE_RESPONSE => {
                self.warnings += 1;
            }
            Tag::ERROR_RESPONSE => {
                self.error = Some(extract_error_fields(msg));
            }
            Tag::COMMAND_COMPLETE | Tag::EMPTY_QUERY_RESPONSE => {
                // Leave state where it landed (Start if no result set was ever seen);
                // ReadyForQuery is what actually closes out the reply.
            }
            Tag::READY_FOR_QUERY => {
                self.is_ok = self.rows == 0 && self.error.is_none();
                self.state = ReplyState::Done;
            }
            other => {
                warn!(tag = %other, "unexpected message while tracking a reply");
            }
        }
    }
}

/// Pulls the SQLSTATE (`C`) and human-readable message (`M`) fields out of an
/// ErrorResponse/NoticeResponse's sequence of null-terminated `tag, value` pairs.
fn extract_error_fields(msg: &Message) -> (String, String) {
    let mut r = msg.reader();
    let mut sqlstate = String::new();
    let mut message = String::new();
    loop {
        let field = r.read_byte();
        if field == 0 {
            break;
        }
        let value = match r.read_str() {
            Ok(s) => s,
            Err(_) => break,
        };
        match field {
            b'C' => sqlstate = value.to_string(),
            b'M' => message = value.to_string(),
            _ => {}
        }
    }
    (sqlstate, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riverdb::pg::protocol::{MessageBuilder};

    #[test]
    fn tracks_row_description_then_rows_then_ready() {
        let mut reply = Reply::new();

        let mut mb = MessageBuilder::new(Tag::ROW_DESCRIPTION);
        mb.write_i16(2);
        let msgs = mb.finish();
        reply.process_message(&msgs.first().unwrap());
        assert_eq!(reply.state, ReplyState::RsetColdef);
        assert_eq!(reply.field_count, 2);

        let mut mb2 = MessageBuilder::new(Tag::DATA_ROW);
        let msgs2 = mb2.finish();
        reply.process_message(&msgs2.first().unwrap());
        assert_eq!(reply.state, ReplyState::RsetRows);
        assert_eq!(reply.rows, 1);

        let mut mb3 = MessageBuilder::new(Tag::READY_FOR_QUERY);
        mb3.write_byte(b'I');
        let msgs3 = mb3.finish();
        reply.process_message(&msgs3.first().unwrap());
        assert!(reply.is_done());
        // One row was returned, so this isn't a bare command-complete acknowledgement.
        assert!(!reply.is_ok);
    }

    #[test]
    fn tracks_error_response() {
        let mut reply = Reply::new();
        let mut mb = MessageBuilder::new(Tag::ERROR_RESPONSE);
        mb.write_byte(b'C');
        mb.write_str("42601");
        mb.write_byte(b'M');
        mb.write_str("syntax error");
        mb.write_byte(0);
        let msgs = mb.finish();
        reply.process_message(&msgs.first().unwrap());
        assert!(reply.has_error());
        assert_eq!(reply.error.as_ref().unwrap().0, "42601");
    }
}
