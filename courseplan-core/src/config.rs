//! Global courseplan configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{CoursePlanError, CoursePlanResult};
use crate::fixture::Fixture;
use crate::period::{DEFAULT_PERIOD_STARTS, PERIOD_PADDING_MINUTES, PeriodTable};

static DEFAULT_DATA_PATH: &str = "~/.local/share/courseplan";
static DEFAULT_TIMEZONE: &str = "Asia/Shanghai";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_padding() -> u32 {
    PERIOD_PADDING_MINUTES
}

/// A fixture as written in the config file, tagged with its semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterFixture {
    /// Semester id, e.g. `2025-2026_Autumn`
    pub semester: String,
    pub week: u32,
    pub day: u32,
    /// Omit to cancel the slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<NaiveDate>,
}

/// Global configuration at ~/.config/courseplan/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CoursePlanConfig {
    /// Where the semester index, lesson files and the plan store live
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL serving `lessonData_index.json` and `LessonData/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,

    /// Semester used when none is given, latest in the index otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_semester: Option<String>,

    /// IANA zone for exported events, `floating` for none
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Period start times, `H:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_times: Option<Vec<String>>,

    #[serde(default = "default_padding")]
    pub period_padding_minutes: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixtures: Vec<SemesterFixture>,
}

impl Default for CoursePlanConfig {
    fn default() -> Self {
        CoursePlanConfig {
            data_dir: default_data_dir(),
            remote_url: None,
            default_semester: None,
            timezone: default_timezone(),
            period_times: None,
            period_padding_minutes: default_padding(),
            fixtures: Vec::new(),
        }
    }
}

impl CoursePlanConfig {
    pub fn config_path() -> CoursePlanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CoursePlanError::Config("Could not determine config directory".into()))?
            .join("courseplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/courseplan/config.toml, creating a commented default
    /// file on first use.
    pub fn load() -> CoursePlanResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CoursePlanResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| CoursePlanError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CoursePlanError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CoursePlanResult<()> {
        let contents = format!(
            "\
# courseplan configuration

# Where lesson data and your starred lessons live:
# data_dir = \"{DEFAULT_DATA_PATH}\"

# Where `courseplan fetch` downloads lesson data from:
# remote_url = \"https://example.edu/course-plus-data\"

# Semester shown when none is given (latest otherwise):
# default_semester = \"2025-2026_Autumn\"

# Time zone of exported events (\"floating\" for none):
# timezone = \"{DEFAULT_TIMEZONE}\"

# Start of each period and how long the last period of a class runs:
# period_times = [\"8:00\", \"8:50\", \"9:50\", \"10:40\", \"11:30\", \"13:00\", \"13:50\",
#                 \"14:50\", \"15:40\", \"16:30\", \"18:00\", \"18:50\", \"19:40\", \"20:30\"]
# period_padding_minutes = {PERIOD_PADDING_MINUTES}

# Holiday shifts. Omit `on` to cancel the classes of that day.
# [[fixtures]]
# semester = \"2025-2026_Autumn\"
# week = 5
# day = 3
# on = \"2025-10-11\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoursePlanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CoursePlanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn period_table(&self) -> CoursePlanResult<PeriodTable> {
        match &self.period_times {
            Some(times) => PeriodTable::from_times(times, self.period_padding_minutes),
            None => PeriodTable::new(DEFAULT_PERIOD_STARTS.to_vec(), self.period_padding_minutes),
        }
    }

    /// None when events should be written as floating local time.
    pub fn timezone(&self) -> CoursePlanResult<Option<Tz>> {
        let name = self.timezone.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("floating") {
            return Ok(None);
        }
        name.parse::<Tz>()
            .map(Some)
            .map_err(|_| CoursePlanError::UnknownTimeZone(name.to_string()))
    }

    /// Fixtures configured for `semester`, in file order.
    pub fn fixtures_for(&self, semester: &str) -> Vec<Fixture> {
        self.fixtures
            .iter()
            .filter(|f| f.semester == semester)
            .map(|f| Fixture {
                week: f.week,
                day: f.day,
                on: f.on,
            })
            .collect()
    }

    /// The effective configuration, defaults filled in, as TOML.
    pub fn to_toml(&self) -> CoursePlanResult<String> {
        toml::to_string_pretty(self).map_err(|e| CoursePlanError::Serialization(e.to_string()))
    }
}
