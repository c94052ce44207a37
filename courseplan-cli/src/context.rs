use anyhow::{Context as _, Result};
use courseplan_core::Lesson;
use courseplan_core::config::CoursePlanConfig;
use courseplan_core::data::DataDir;
use courseplan_core::selection::Plan;
use courseplan_core::semester::SemesterEntry;
use courseplan_core::store::PlanStore;
use tracing::debug;

/// Config and local storage shared by all commands.
pub struct Context {
    pub config: CoursePlanConfig,
    pub data: DataDir,
    pub plans: PlanStore,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = CoursePlanConfig::load().context("Failed to load config")?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: CoursePlanConfig) -> Self {
        let root = config.data_path();
        debug!(data_dir = %root.display(), "using data directory");
        Context {
            data: DataDir::new(&root),
            plans: PlanStore::in_dir(&root),
            config,
        }
    }

    /// Semester id from the command line, else the configured default, else
    /// the latest one in the index.
    pub fn requested_semester<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested.or(self.config.default_semester.as_deref())
    }

    pub fn semester(&self, requested: Option<&str>) -> Result<SemesterEntry> {
        let index = self.data.index()?;
        let entry = index.resolve(self.requested_semester(requested))?;
        Ok(entry.clone())
    }

    pub fn lessons(&self, entry: &SemesterEntry) -> Result<Vec<Lesson>> {
        Ok(self.data.lessons(&entry.id())?)
    }

    pub fn plan(&self, entry: &SemesterEntry) -> Result<Plan> {
        Ok(self.plans.load(&entry.id())?)
    }
}
