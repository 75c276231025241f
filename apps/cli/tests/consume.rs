use ideaforge_cli::{StreamConsumer, Utf8Decoder};

const MIXED: &str = "Hello, 世界! Naïve café — ✓";

#[test]
fn single_chunk_decodes_verbatim() {
    let mut consumer = StreamConsumer::new();
    let delta = consumer.push(MIXED.as_bytes());
    assert_eq!(delta, MIXED);
    assert_eq!(consumer.finish(), MIXED);
}

#[test]
fn any_split_point_reassembles_exactly() {
    let bytes = MIXED.as_bytes();
    for split in 0..=bytes.len() {
        let mut consumer = StreamConsumer::new();
        consumer.push(&bytes[..split]);
        consumer.push(&bytes[split..]);
        assert_eq!(consumer.text(), MIXED, "split at byte {split}");
    }
}

#[test]
fn byte_at_a_time_reassembles_exactly() {
    let mut consumer = StreamConsumer::new();
    for byte in MIXED.as_bytes() {
        consumer.push(std::slice::from_ref(byte));
    }
    assert_eq!(consumer.finish(), MIXED);
}

#[test]
fn split_multibyte_yields_nothing_until_complete() {
    // "世" is e4 b8 96.
    let mut decoder = Utf8Decoder::new();
    assert_eq!(decoder.decode(&[0xe4]), "");
    assert_eq!(decoder.decode(&[0xb8]), "");
    assert_eq!(decoder.decode(&[0x96]), "世");
    assert_eq!(decoder.finish(), None);
}

#[test]
fn dangling_partial_sequence_flushes_as_replacement() {
    let mut consumer = StreamConsumer::new();
    consumer.push("ok ".as_bytes());
    consumer.push(&[0xe4, 0xb8]);
    assert_eq!(consumer.text(), "ok ");
    assert_eq!(consumer.finish(), "ok \u{fffd}");
}

#[test]
fn invalid_byte_decodes_as_replacement_and_resumes() {
    let mut decoder = Utf8Decoder::new();
    assert_eq!(decoder.decode(&[b'a', 0xff, b'b']), "a\u{fffd}b");
}

#[test]
fn document_is_append_only() {
    let mut consumer = StreamConsumer::new();
    let mut previous = String::new();
    for chunk in ["# Title", "\n\nSome ", "body 世", "界 text."] {
        consumer.push(chunk.as_bytes());
        assert!(consumer.text().starts_with(&previous));
        previous = consumer.text().to_owned();
    }
    assert_eq!(consumer.finish(), "# Title\n\nSome body 世界 text.");
}
