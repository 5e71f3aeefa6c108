use crate::error::{ConvertError, Result};
use crate::event::Trace;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Decode the JSON array of traces at the start of `path`.
///
/// Only the first JSON value is read; anything after it is ignored. A file
/// with no value at all yields an empty list.
pub fn read_traces<P: AsRef<Path>>(path: P) -> Result<Vec<Trace>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ConvertError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut values =
        serde_json::Deserializer::from_reader(BufReader::new(file)).into_iter::<Vec<Trace>>();

    match values.next() {
        Some(traces) => traces.map_err(|source| ConvertError::Decode {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}

/// Load the single trace stored at `path`.
///
/// Files are expected to hold exactly one trace. Additional traces are
/// ignored with a warning; an empty array is an error.
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Trace> {
    let path = path.as_ref();
    let traces = read_traces(path)?;
    let total = traces.len();

    let trace = traces
        .into_iter()
        .next()
        .ok_or_else(|| ConvertError::EmptyInput {
            path: path.to_path_buf(),
        })?;

    if total > 1 {
        tracing::warn!(
            "{:?} contains {} traces; converting {} and ignoring {}",
            path,
            total,
            trace.id,
            total - 1
        );
    }

    tracing::debug!("Loaded trace {} with {} events", trace.id, trace.events.len());
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "causelog-trace-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_first_trace() {
        let path = scratch_file(
            "first",
            r#"[
                {"id": "t1", "reports": [{"ProcessName": "A", "ThreadID": 0, "EventID": "e1"}]},
                {"id": "t2", "reports": []}
            ]"#,
        );

        let trace = load_trace(&path).unwrap();
        assert_eq!(trace.id, "t1");
        assert_eq!(trace.events.len(), 1);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn empty_array_is_rejected() {
        let path = scratch_file("empty", "[]");
        assert!(matches!(
            load_trace(&path),
            Err(ConvertError::EmptyInput { .. })
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn content_after_first_value_is_ignored() {
        let path = scratch_file(
            "trailing",
            r#"[{"id": "t1", "reports": []}]
[{"id": "t2", "reports": []}] trailing"#,
        );

        let traces = read_traces(&path).unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].id, "t1");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn blank_file_is_rejected_as_empty() {
        let path = scratch_file("blank", "  \n");
        assert!(matches!(
            load_trace(&path),
            Err(ConvertError::EmptyInput { .. })
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let path = scratch_file("malformed", "{not json");
        assert!(matches!(read_traces(&path), Err(ConvertError::Decode { .. })));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let path = std::env::temp_dir().join("causelog-trace-does-not-exist.json");
        assert!(matches!(read_traces(&path), Err(ConvertError::Open { .. })));
    }
}
