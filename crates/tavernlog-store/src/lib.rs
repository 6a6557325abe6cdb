use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::Context;

/// Atomic write: write to temp file in same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => anyhow::bail!("no parent dir for {}", path.display()),
    };
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

/// Read a JSONL file into values, one per non-blank line.
///
/// A line that is not valid JSON fails the whole read; the error names the
/// file and the 1-based line number.
pub fn read_jsonl(path: &Path) -> anyhow::Result<Vec<Value>> {
    let file =
        fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid JSON record", path.display(), idx + 1))?;
        records.push(value);
    }
    Ok(records)
}

/// `chat_metadata` of the first record in a chat log.
///
/// Returns `None` when the log has no records at all, and an empty object
/// when the first record has no `chat_metadata` key.
pub fn first_chat_metadata(records: &[Value]) -> Option<Value> {
    let first = records.first()?;
    Some(
        first
            .get("chat_metadata")
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
    )
}

/// Serialize `items` as compact JSON, one per line, and write them atomically.
pub fn write_jsonl<T: Serialize>(path: &Path, items: &[T]) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    for item in items {
        serde_json::to_writer(&mut buf, item)?;
        buf.push(b'\n');
    }
    write_atomic(path, &buf).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), records = items.len(), bytes = buf.len(), "wrote jsonl");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn write_atomic_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("test.txt");
        write_atomic(&path, b"hello world").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
    }

    #[test]
    fn write_atomic_replaces_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("chat.jsonl");
        fs::write(&path, "old contents that are longer").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn read_jsonl_skips_blank_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ref.jsonl");
        fs::write(&path, "{\"a\":1}\n\n   \n{\"b\":2}\n").unwrap();
        let records = read_jsonl(&path).unwrap();
        assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn read_jsonl_reports_bad_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ref.jsonl");
        fs::write(&path, "{\"a\":1}\nnot json\n").unwrap();
        let err = read_jsonl(&path).unwrap_err();
        assert!(format!("{err:#}").contains("ref.jsonl:2"));
    }

    #[test]
    fn read_jsonl_missing_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(read_jsonl(&tmp.path().join("missing.jsonl")).is_err());
    }

    #[test]
    fn first_chat_metadata_cases() {
        assert_eq!(first_chat_metadata(&[]), None);
        assert_eq!(
            first_chat_metadata(&[json!({"user_name": "Alice"})]),
            Some(json!({}))
        );
        assert_eq!(
            first_chat_metadata(&[
                json!({"chat_metadata": {"note_prompt": "n"}}),
                json!({"chat_metadata": {"ignored": true}}),
            ]),
            Some(json!({"note_prompt": "n"}))
        );
    }

    #[test]
    fn write_jsonl_one_object_per_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.jsonl");
        write_jsonl(&path, &[json!({"x": 1}), json!({"y": "two"})]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\"x\":1}\n{\"y\":\"two\"}\n");
    }

    #[test]
    fn write_jsonl_empty_writes_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.jsonl");
        write_jsonl::<Value>(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
