use std::{fs, io, path::Path};

use crate::{errors::FormError, wizard::Snapshot};

/// Writes a suspended session to disk atomically by staging to a temporary file.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<(), FormError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    tracing::debug!(path = %path.display(), step = snapshot.step_index, "session saved");
    Ok(())
}

/// Loads a suspended session. Returns `Ok(None)` when nothing was saved.
pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>, FormError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

/// Deletes a suspended session, reporting whether one existed.
pub fn remove_snapshot(path: &Path) -> Result<bool, FormError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DataStore, StepData};
    use serde_json::json;

    fn sample() -> Snapshot {
        let mut data = DataStore::new();
        let mut entry = StepData::new();
        entry.insert("text".into(), json!("x"));
        data.put("step0", entry);
        Snapshot::new("demo", 1, data)
    }

    #[test]
    fn save_then_load_returns_same_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions").join("demo.json");
        let snapshot = sample();

        save_snapshot(&snapshot, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap().expect("snapshot present");

        assert_eq!(loaded, snapshot);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_session_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_snapshot(&dir.path().join("nope.json")).unwrap().is_none());
        assert!(!remove_snapshot(&dir.path().join("nope.json")).unwrap());
    }

    #[test]
    fn corrupt_session_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_snapshot(&path), Err(FormError::Serde(_))));
    }
}
