//! Local key-value storage of plans, one entry per semester.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::CoursePlanResult;
use crate::selection::Plan;

const PLANS_FILE: &str = "plans.json";

/// `plans.json` in the data directory, mapping semester id to plan.
pub struct PlanStore {
    path: PathBuf,
}

impl PlanStore {
    pub fn in_dir(data_dir: &Path) -> Self {
        PlanStore {
            path: data_dir.join(PLANS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> CoursePlanResult<BTreeMap<String, Plan>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Plan of a semester, empty when nothing was stored yet.
    pub fn load(&self, semester: &str) -> CoursePlanResult<Plan> {
        Ok(self.read_all()?.remove(semester).unwrap_or_default())
    }

    /// Replace the stored plan of a semester.
    pub fn save(&self, semester: &str, plan: &Plan) -> CoursePlanResult<()> {
        let mut all = self.read_all()?;
        if plan.starred.is_empty() && plan.selected.is_empty() {
            all.remove(semester);
        } else {
            all.insert(semester.to_string(), plan.clone());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, serde_json::to_string_pretty(&all)?)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    /// Load, apply `f`, save. Returns the new plan.
    pub fn update<F>(&self, semester: &str, f: F) -> CoursePlanResult<Plan>
    where
        F: FnOnce(&Plan) -> Plan,
    {
        let next = f(&self.load(semester)?);
        self.save(semester, &next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_plan() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::in_dir(dir.path());
        assert_eq!(store.load("2025-2026_Autumn").unwrap(), Plan::default());
    }

    #[test]
    fn test_semesters_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::in_dir(&dir.path().join("data"));

        store.update("2025-2026_Autumn", |p| p.select("A")).unwrap();
        store.update("2024-2025_Spring", |p| p.star("B")).unwrap();

        let autumn = store.load("2025-2026_Autumn").unwrap();
        assert!(autumn.is_selected("A"));
        assert!(!autumn.is_starred("B"));
        assert!(store.load("2024-2025_Spring").unwrap().is_starred("B"));
    }

    #[test]
    fn test_update_returns_new_plan_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::in_dir(dir.path());

        let plan = store.update("S", |p| p.star("A").star("B")).unwrap();
        assert_eq!(plan.starred.len(), 2);

        let plan = store.update("S", |p| p.unstar("A")).unwrap();
        assert_eq!(store.load("S").unwrap(), plan);
        assert!(!dir.path().join("plans.json.tmp").exists());
    }

    #[test]
    fn test_empty_plan_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::in_dir(dir.path());

        store.update("S", |p| p.star("A")).unwrap();
        store.update("S", |p| p.unstar("A")).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.trim(), "{}");
    }
}
