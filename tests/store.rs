use std::io::Write;

use aimeshare::store::{ConversationStore, FileStore, Role, StoreError};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn write_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn reads_single_record() {
    let file = write_json(
        r#"{"id":"abc","title":null,"model":"m1","messages":"[{\"role\":\"assistant\",\"content\":\"<think>x</think>y\"}]"}"#,
    );
    let store = FileStore::new(file.path());

    let conversation = store.fetch("abc").await.unwrap();
    assert_eq!(conversation.display_title(), "Untitled Conversation");
    assert_eq!(conversation.display_model(), "m1");
    assert_eq!(conversation.messages.len(), 1);
    assert_eq!(conversation.messages[0].role, Role::Assistant);
}

#[tokio::test]
async fn selects_row_by_id() {
    let file = write_json(
        r#"[{"id":"a","messages":[]},{"id":"b","messages":[{"role":"user","content":"hi"}]}]"#,
    );
    let store = FileStore::new(file.path());

    let conversation = store.fetch("b").await.unwrap();
    assert_eq!(conversation.id, "b");
    assert!(matches!(
        store.fetch("zzz").await,
        Err(StoreError::NotFound(id)) if id == "zzz"
    ));
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent.json"));
    assert!(matches!(store.fetch("a").await, Err(StoreError::Io(_))));
}
