//! Lesson data on disk.
//!
//! The layout mirrors the published data so a downloaded copy can be used
//! as-is:
//!
//! ```text
//! <data_dir>/lessonData_index.json
//! <data_dir>/LessonData/Parsed_<semester id>.json
//! ```

use std::path::{Path, PathBuf};

use crate::error::{CoursePlanError, CoursePlanResult};
use crate::lesson::{Lesson, parse_lessons};
use crate::semester::{INDEX_FILE, SemesterIndex, lesson_file};

#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn lessons_path(&self, semester: &str) -> PathBuf {
        self.root.join(lesson_file(semester))
    }

    pub fn index(&self) -> CoursePlanResult<SemesterIndex> {
        let path = self.index_path();
        if !path.exists() {
            return Err(CoursePlanError::LessonData(format!(
                "No semester index at {}. Run `courseplan fetch` first",
                path.display()
            )));
        }
        SemesterIndex::parse(&std::fs::read_to_string(&path)?)
    }

    pub fn lessons(&self, semester: &str) -> CoursePlanResult<Vec<Lesson>> {
        let path = self.lessons_path(semester);
        if !path.exists() {
            return Err(CoursePlanError::LessonData(format!(
                "No lesson data for {} at {}",
                semester,
                path.display()
            )));
        }
        let content = std::fs::read_to_string(&path)?;
        parse_lessons(&content).map_err(|e| {
            CoursePlanError::LessonData(format!("{}: {}", path.display(), e))
        })
    }

    /// Store a downloaded index after checking that it parses.
    pub fn write_index(&self, json: &str) -> CoursePlanResult<SemesterIndex> {
        let index = SemesterIndex::parse(json)?;
        write_atomic(&self.index_path(), json)?;
        Ok(index)
    }

    /// Store a downloaded lesson file after checking that it parses.
    pub fn write_lessons(&self, semester: &str, json: &str) -> CoursePlanResult<usize> {
        let lessons = parse_lessons(json)?;
        write_atomic(&self.lessons_path(semester), json)?;
        Ok(lessons.len())
    }
}

fn write_atomic(path: &Path, content: &str) -> CoursePlanResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let temp = path.with_extension("json.tmp");
    std::fs::write(&temp, content)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"[{"year": "2025-2026", "semester": "Autumn", "first_day": "2025-09-01"}]"#;
    const LESSONS: &str = r#"[{"kch": "MATH1001", "kcmc": "Calculus", "jxbmc": "S1",
        "zcd": 64, "cdjc": 24, "xqj": 1, "xf": 4}]"#;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());

        let index = data.write_index(INDEX).unwrap();
        assert_eq!(index.latest().unwrap().id(), "2025-2026_Autumn");
        assert_eq!(data.write_lessons("2025-2026_Autumn", LESSONS).unwrap(), 1);

        assert_eq!(data.index().unwrap(), index);
        let lessons = data.lessons("2025-2026_Autumn").unwrap();
        assert_eq!(lessons[0].section_id, "S1");
        assert!(
            dir.path()
                .join("LessonData/Parsed_2025-2026_Autumn.json")
                .exists()
        );
    }

    #[test]
    fn test_missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());

        assert!(data.index().unwrap_err().to_string().contains("courseplan fetch"));
        assert!(matches!(
            data.lessons("2025-2026_Autumn"),
            Err(CoursePlanError::LessonData(_))
        ));
    }

    #[test]
    fn test_invalid_download_is_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());

        assert!(data.write_lessons("X", "<html>login</html>").is_err());
        assert!(!data.lessons_path("X").exists());
    }
}
