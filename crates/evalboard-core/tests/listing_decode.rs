use evalboard_core::providers::http::{decode_chatbot_listing, decode_history, decode_knowledge_base};
use serde_json::json;

#[test]
fn listing_accepts_plain_array() {
    let bots = decode_chatbot_listing(json!([
        {"id": "test1", "name": "test1", "knowledge_bases": ["giraffes"], "generative_model": "gpt-4-o"},
        {"id": "test2", "name": "support"}
    ]))
    .unwrap();
    assert_eq!(bots.len(), 2);
    assert_eq!(bots[1].name.as_deref(), Some("support"));
}

#[test]
fn listing_accepts_string_encoded_array() {
    let encoded = serde_json::to_string(&json!([{"id": "x", "name": "bot"}])).unwrap();
    let bots = decode_chatbot_listing(json!(encoded)).unwrap();
    assert_eq!(bots[0].id.to_string(), "x");
}

#[test]
fn listing_entry_with_odd_name_is_kept_but_never_matches() {
    let bots = decode_chatbot_listing(json!([
        {"id": "a", "name": 5},
        {"id": "b", "name": "bot"}
    ]))
    .unwrap();
    assert_eq!(bots.len(), 2);
    assert_eq!(bots[0].name, None);
    assert_eq!(bots[1].name.as_deref(), Some("bot"));
}

#[test]
fn history_with_non_scalar_chatbot_id_decodes() {
    let records = decode_history(json!([{"chatbot_id": true, "time": "2024-01-01"}])).unwrap();
    assert_eq!(records[0].chatbot_id, None);
}

#[test]
fn listing_rejects_other_shapes() {
    assert!(decode_chatbot_listing(json!({"message": "nope"})).is_err());
    assert!(decode_chatbot_listing(json!("not json")).is_err());
    assert!(decode_chatbot_listing(json!([{"name": "no id"}])).is_err());
}

#[test]
fn empty_history_is_not_an_error() {
    assert!(decode_history(json!([])).unwrap().is_empty());
    assert!(decode_history(json!(null)).unwrap().is_empty());
    assert!(decode_history(json!({"rows": []})).is_err());
}

#[test]
fn knowledge_base_decodes_files() {
    let kb = decode_knowledge_base(json!({
        "id": "giraffes",
        "kb_name": "giraffes",
        "splitter_config": {"chunk_size": 512},
        "files": [
            {"file_name": "a.pdf", "content_type": "application/pdf", "date_uploaded": "2024-05-01", "time_uploaded": "12:00:00"}
        ]
    }))
    .unwrap()
    .expect("kb");
    assert_eq!(kb.kb_name, "giraffes");
    assert_eq!(kb.files[0].content_type, "application/pdf");
}

#[test]
fn unknown_knowledge_base_message_is_none() {
    let kb = decode_knowledge_base(json!({"message": "zebras does not exist"})).unwrap();
    assert!(kb.is_none());
}
