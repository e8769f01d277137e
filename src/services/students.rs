// src/services/students.rs
use std::{collections::HashMap, fmt::Debug, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Scores {
    #[serde(alias = "tech")]
    pub technical: u8,
    #[serde(alias = "music")]
    pub musicianship: u8,
    #[serde(alias = "rep")]
    pub repertoire: u8,
    #[serde(alias = "art")]
    pub artistry: u8,
}

impl Scores {
    pub fn new(technical: u8, musicianship: u8, repertoire: u8, artistry: u8) -> Self {
        Self { technical, musicianship, repertoire, artistry }
    }

    fn out_of_range(&self) -> Option<(&'static str, u8)> {
        [
            ("technical", self.technical),
            ("musicianship", self.musicianship),
            ("repertoire", self.repertoire),
            ("artistry", self.artistry),
        ]
        .into_iter()
        .find(|(_, value)| *value > 100)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub instrument: String,
    pub age: u32,
    pub scores: Scores,
    pub context: String,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read student roster {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid student roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("student {student_id} has {field} score {value}, expected 0-100")]
    ScoreOutOfRange {
        student_id: String,
        field: &'static str,
        value: u8,
    },
}

/// Read-only lookup of student metadata by id.
pub trait StudentDirectory: Send + Sync + Debug {
    fn get_by_id(&self, id: &str) -> Option<StudentRecord>;
}

/// Immutable in-memory roster.
#[derive(Clone, Debug, Default)]
pub struct StaticDirectory {
    inner: Arc<HashMap<String, StudentRecord>>,
}

impl StaticDirectory {
    pub fn new(records: impl IntoIterator<Item = StudentRecord>) -> Result<Self, DirectoryError> {
        let mut table = HashMap::new();
        for record in records {
            if let Some((field, value)) = record.scores.out_of_range() {
                return Err(DirectoryError::ScoreOutOfRange {
                    student_id: record.id,
                    field,
                    value,
                });
            }
            table.insert(record.id.clone(), record);
        }
        Ok(Self { inner: Arc::new(table) })
    }

    /// Parse a JSON object keyed by student id. The key wins over any `id` in the record.
    pub fn from_json_str(json: &str) -> Result<Self, DirectoryError> {
        let raw: HashMap<String, StudentRecord> = serde_json::from_str(json)?;
        Self::new(raw.into_iter().map(|(id, mut record)| {
            record.id = id;
            record
        }))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The five-student demo roster.
    pub fn builtin() -> Self {
        let roster = [
            ("S01", "Aoife Byrne", "Violin", 10, Scores::new(58, 55, 60, 62),
                "Development stage, working on Twinkle variations and basic bow technique"),
            ("S02", "Conor Walsh", "Flute", 12, Scores::new(70, 72, 74, 68),
                "Intermediate stage, studying Bach Minuet and improving breath control"),
            ("S03", "Ella Murphy", "Piano", 14, Scores::new(82, 80, 85, 78),
                "Advanced stage, preparing Chopin Nocturne and working on pedaling technique"),
            ("S04", "Rory Fitzpatrick", "Trumpet", 15, Scores::new(92, 78, 76, 80),
                "Young Artist stage, strong technical skills but needs musicianship development"),
            ("S05", "Saoirse Nolan", "Voice", 17, Scores::new(85, 90, 92, 94),
                "Young Artist stage, preparing for conservatory auditions with art song repertoire"),
        ];

        let table = roster
            .into_iter()
            .map(|(id, name, instrument, age, scores, context)| {
                let record = StudentRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    instrument: instrument.to_string(),
                    age,
                    scores,
                    context: context.to_string(),
                };
                (record.id.clone(), record)
            })
            .collect();

        Self { inner: Arc::new(table) }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl StudentDirectory for StaticDirectory {
    fn get_by_id(&self, id: &str) -> Option<StudentRecord> {
        self.inner.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_roster_lookup() {
        let dir = StaticDirectory::builtin();
        assert_eq!(dir.len(), 5);

        let ella = dir.get_by_id("S03").unwrap();
        assert_eq!(ella.name, "Ella Murphy");
        assert_eq!(ella.instrument, "Piano");
        assert_eq!(ella.scores.repertoire, 85);
        assert!(dir.get_by_id("S99").is_none());
        assert!(dir.get_by_id("s01").is_none());
    }

    #[test]
    fn json_roster_accepts_short_score_labels() {
        let json = r#"{
            "T01": {
                "name": "Niamh Kelly",
                "instrument": "Cello",
                "age": 13,
                "scores": { "tech": 64, "music": 70, "rep": 66, "art": 71 },
                "context": "Preparing a Grade 5 exam"
            }
        }"#;
        let dir = StaticDirectory::from_json_str(json).unwrap();
        let niamh = dir.get_by_id("T01").unwrap();
        assert_eq!(niamh.id, "T01");
        assert_eq!(niamh.scores, Scores::new(64, 70, 66, 71));
    }

    #[test]
    fn json_roster_rejects_out_of_range_scores() {
        let json = r#"{
            "T02": {
                "name": "Cian Doyle",
                "instrument": "Guitar",
                "age": 16,
                "scores": { "technical": 101, "musicianship": 70, "repertoire": 66, "artistry": 71 },
                "context": ""
            }
        }"#;
        let err = StaticDirectory::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::ScoreOutOfRange { field: "technical", value: 101, .. }
        ));
    }

    #[test]
    fn missing_roster_file_is_io_error() {
        let err = StaticDirectory::from_json_file("/nonexistent/roster.json").unwrap_err();
        assert!(matches!(err, DirectoryError::Io { .. }));
    }
}
