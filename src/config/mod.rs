use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".expense_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Monthly budget configuration: a single default figure plus optional
/// per-month overrides keyed by the abbreviated month label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetConfig {
    pub monthly_budget: Decimal,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, Decimal>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            monthly_budget: dec!(2000),
            overrides: BTreeMap::new(),
        }
    }
}

impl BudgetConfig {
    pub fn new(monthly_budget: Decimal) -> Self {
        Self {
            monthly_budget,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, month_label: impl Into<String>, amount: Decimal) -> Self {
        self.overrides.insert(month_label.into(), amount);
        self
    }

    /// Budget for a month label, falling back to the configured default.
    pub fn budget_for_month(&self, month_label: &str) -> Decimal {
        self.overrides
            .get(month_label)
            .copied()
            .unwrap_or(self.monthly_budget)
    }

    /// Loads configuration from `path`; a missing file yields the default.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        tracing::info!(path = %path.display(), "budget configuration saved");
        Ok(())
    }
}

/// Returns the application data directory, defaulting to `~/.expense_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("EXPENSE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the managed configuration file.
pub fn config_file() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
