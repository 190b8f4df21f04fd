//! JSON export of a computed result.
//!
//! NaN figures (source policy only) serialize as `null`.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use gpacalc_core::aggregator::GpaResult;
use gpacalc_core::model::CourseEntry;
use gpacalc_core::session::Session;

/// The roster and the result computed from it.
#[derive(Debug, Clone, Serialize)]
pub struct GpaDocument {
    pub computed_at: DateTime<Utc>,
    /// The roster changed after the result was computed.
    pub stale: bool,
    pub courses: Vec<CourseEntry>,
    pub result: GpaResult,
}

impl GpaDocument {
    /// Build from a session's current snapshot. `None` while idle.
    pub fn from_session(session: &Session) -> Option<Self> {
        let snapshot = session.snapshot()?;
        Some(Self {
            computed_at: snapshot.computed_at,
            stale: session.is_stale(),
            courses: session.roster().iter().cloned().collect(),
            result: snapshot.result.clone(),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize GPA result")
    }

    /// Save the document as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpacalc_core::model::{CourseUpdate, Year};

    fn computed_session() -> Session {
        let mut session = Session::default();
        let id = session.add_course(Year::THIRD);
        session
            .edit_course(id, CourseUpdate::SetGrade("A-".into()))
            .unwrap();
        session
            .edit_course(id, CourseUpdate::SetCredits("4".into()))
            .unwrap();
        session.compute();
        session
    }

    #[test]
    fn idle_session_has_no_document() {
        assert!(GpaDocument::from_session(&Session::default()).is_none());
    }

    #[test]
    fn document_serializes_roster_and_result() {
        let doc = GpaDocument::from_session(&computed_session()).unwrap();
        let json = doc.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stale"], false);
        assert_eq!(value["courses"][0]["grade"], "A-");
        assert_eq!(value["courses"][0]["year"], 3);
        assert_eq!(value["result"]["overall_gpa"], 1.11);
        assert_eq!(value["result"]["breakdown"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn document_marks_stale_snapshot() {
        let mut session = computed_session();
        session.add_course(Year::FIRST);
        let doc = GpaDocument::from_session(&session).unwrap();
        assert!(doc.stale);
        assert_eq!(doc.courses.len(), 2);
        assert_eq!(doc.result.breakdown[0].counted_courses, 0);
    }

    #[test]
    fn save_json_writes_file() {
        let doc = GpaDocument::from_session(&computed_session()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/gpa.json");

        doc.save_json(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"overall_gpa\""));
    }
}
