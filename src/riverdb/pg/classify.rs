use crate::riverdb::pg::protocol::{Message, Tag};
use crate::riverdb::pg::sql::QueryType;

/// The subset of a command's shape that routing cares about. A thin adapter over the
/// query classifier: routing never needs to know anything about a statement beyond
/// these two predicates.
pub trait CommandClassifier {
    /// True for DDL/permission statements that must run on every node to keep the
    /// cluster's schema and grants in sync (CREATE/DROP/ALTER/GRANT/REVOKE), except
    /// CREATE TEMPORARY TABLE, which is inherently session-local and single-node.
    fn is_multi_node(&self, msg: &Message) -> bool;

    /// True if the backend will send a reply for this message at all. Most frontend
    /// messages provoke a reply; Sync/Flush do but some protocol messages (e.g. a
    /// CopyData fragment) don't complete a reply on their own. Must be side-effect-free
    /// and deterministic: routing calls it speculatively while deciding how to proceed.
    fn will_respond(&self, msg: &Message) -> bool;
}

/// The default classifier: a Query message is multi-node iff its statement type is one
/// of CREATE/DROP/ALTER/GRANT/REVOKE and it isn't a CREATE TEMPORARY TABLE.
#[derive(Default, Clone, Copy)]
pub struct QueryClassifier;

impl QueryClassifier {
    pub fn new() -> Self {
        Self
    }

    fn classify(&self, msg: &Message) -> Option<(QueryType, String)> {
        if msg.tag() != Tag::QUERY {
            return None;
        }
        let mut r = msg.reader();
        let query = r.read_str().ok()?.to_uppercase();
        let normalized = query.trim().to_string();
        let qt = QueryType::from(normalized.as_str());
        Some((qt, normalized))
    }
}

impl CommandClassifier for QueryClassifier {
    fn is_multi_node(&self, msg: &Message) -> bool {
        match self.classify(msg) {
            Some((QueryType::Create, sql)) => !is_create_temp_table(&sql),
            Some((QueryType::Drop, _))
            | Some((QueryType::Alter, _))
            | Some((QueryType::Grant, _))
            | Some((QueryType::Revoke, _)) => true,
            _ => false,
        }
    }

    fn will_respond(&self, msg: &Message) -> bool {
        // Every frontend message in the simple query sub-protocol provokes at least one
        // backend reply message, down to CopyData fragments during an active COPY.
        match msg.tag() {
            Tag::COPY_DATA => false,
            _ => true,
        }
    }
}

/// Recognizes `CREATE TEMP[ORARY] TABLE`, the one CREATE variant that's session-local
/// and therefore routed single-node rather than broadcast.
fn is_create_temp_table(normalized_sql: &str) -> bool {
    debug_assert!(normalized_sql.starts_with("CREATE"));
    let rest = normalized_sql["CREATE".len()..].trim_start();
    let rest = rest
        .strip_prefix("TEMPORARY")
        .or_else(|| rest.strip_prefix("TEMP"))
        .map(str::trim_start);
    matches!(rest, Some(r) if r.starts_with("TABLE"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riverdb::pg::protocol::MessageBuilder;

    fn query_message(sql: &str) -> crate::riverdb::pg::protocol::Messages {
        let mut mb = MessageBuilder::new(Tag::QUERY);
        mb.write_str(sql);
        mb.finish()
    }

    #[test]
    fn create_table_is_multi_node() {
        let classifier = QueryClassifier::new();
        let msgs = query_message("CREATE TABLE foo (id int)");
        assert!(classifier.is_multi_node(&msgs.first().unwrap()));
    }

    #[test]
    fn create_temp_table_is_single_node() {
        let classifier = QueryClassifier::new();
        let msgs = query_message("CREATE TEMPORARY TABLE foo (id int)");
        assert!(!classifier.is_multi_node(&msgs.first().unwrap()));

        let msgs = query_message("CREATE TEMP TABLE foo (id int)");
        assert!(!classifier.is_multi_node(&msgs.first().unwrap()));
    }

    #[test]
    fn select_is_single_node() {
        let classifier = QueryClassifier::new();
        let msgs = query_message("SELECT * FROM foo");
        assert!(!classifier.is_multi_node(&msgs.first().unwrap()));
    }

    #[test]
    fn drop_grant_revoke_alter_are_multi_node() {
        let classifier = QueryClassifier::new();
        for sql in ["DROP TABLE foo", "ALTER TABLE foo ADD COLUMN bar int", "GRANT SELECT ON foo TO bob", "REVOKE SELECT ON foo FROM bob"] {
            let msgs = query_message(sql);
            assert!(classifier.is_multi_node(&msgs.first().unwrap()), "{}", sql);
        }
    }
}
