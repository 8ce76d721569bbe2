//! Known students and classes, used for form suggestions.
//!
//! Picking a suggested student fills in their class as well. The roster is
//! imported from a CSV file with a name column (`name`/`nama`) and a class
//! column (`className`/`class`/`kelas`); header matching is case-insensitive.

use crate::db::storage::Storage;
use crate::libs::messages::Message;
use crate::libs::store::ROSTER_KEY;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_SUGGESTIONS: usize = 5;

const NAME_HEADERS: [&str; 2] = ["name", "nama"];
const CLASS_HEADERS: [&str; 4] = ["classname", "class", "kelas", "class_name"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub name: String,
    pub class_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new(students: Vec<Student>) -> Self {
        Roster { students }
    }

    pub fn load(storage: &Storage) -> Result<Self> {
        let Some(raw) = storage.get(ROSTER_KEY)? else {
            return Ok(Self::default());
        };
        match serde_json::from_str::<Vec<Student>>(&raw) {
            Ok(students) => Ok(Self::new(students)),
            Err(e) => {
                tracing::warn!("{}", Message::RosterLoadFailed(e.to_string()));
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, storage: &mut Storage) -> Result<()> {
        storage.set(ROSTER_KEY, &serde_json::to_string(&self.students)?)
    }

    /// Reads students from a CSV file with a header row.
    pub fn import_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
        let headers = reader.headers()?.clone();
        let find = |candidates: &[&str]| headers.iter().position(|h| candidates.contains(&h.trim_start_matches('\u{feff}').to_lowercase().as_str()));
        let name_idx = find(&NAME_HEADERS).ok_or_else(|| anyhow!("missing name column (expected one of {:?})", NAME_HEADERS))?;
        let class_idx = find(&CLASS_HEADERS).ok_or_else(|| anyhow!("missing class column (expected one of {:?})", CLASS_HEADERS))?;

        let mut students = Vec::new();
        for row in reader.records() {
            let row = row?;
            let name = row.get(name_idx).unwrap_or_default();
            let class_name = row.get(class_idx).unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            students.push(Student {
                name: name.to_string(),
                class_name: class_name.to_string(),
            });
        }
        Ok(Self::new(students))
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Distinct class names in order of first appearance.
    pub fn class_names(&self) -> Vec<String> {
        let mut classes: Vec<String> = Vec::new();
        for student in &self.students {
            if !student.class_name.is_empty() && !classes.contains(&student.class_name) {
                classes.push(student.class_name.clone());
            }
        }
        classes
    }

    /// Students whose name contains `query`, once at least two characters are typed.
    pub fn suggest_students(&self, query: &str) -> Vec<Student> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < 2 {
            return Vec::new();
        }
        self.students.iter().filter(|s| s.name.to_lowercase().contains(&query)).take(MAX_SUGGESTIONS).cloned().collect()
    }

    /// Classes containing `query`, from the first typed character.
    pub fn suggest_classes(&self, query: &str) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.class_names().into_iter().filter(|c| c.to_lowercase().contains(&query)).take(MAX_SUGGESTIONS).collect()
    }
}
