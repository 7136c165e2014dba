//! Application context shared by every command.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::Cli;
use crate::config::{Config, RobotFormat};
use crate::error::Result;
use crate::market::SimulatedJobMarket;
use crate::storage::{Database, ReferencePolicy};

/// Directory used when neither `--root` nor `CURRMAP_ROOT` is given.
pub const DEFAULT_ROOT: &str = ".currmap";

pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub db: Database,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
        let config = Config::load(cli.config.as_deref(), &root)?;
        let robot_mode = cli.robot || config.robot.enabled;
        Self::open(root, config, robot_mode)
    }

    /// Open the store named by `config` under `root`.
    pub fn open(root: PathBuf, config: Config, robot_mode: bool) -> Result<Self> {
        let db_path = config.db_path(&root);
        let policy = if config.store.strict_references {
            ReferencePolicy::Strict
        } else {
            ReferencePolicy::Lossy
        };
        let db = Database::open(&db_path)?.with_reference_policy(policy);
        debug!(
            root = %root.display(),
            db = %db_path.display(),
            ?policy,
            robot_mode,
            "application context ready"
        );
        Ok(Self {
            root,
            config,
            db,
            robot_mode,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn db_path(&self) -> PathBuf {
        self.config.db_path(&self.root)
    }

    /// The configured posting catalog, or the built-in one.
    pub fn job_market(&self) -> Result<SimulatedJobMarket> {
        match &self.config.market.catalog_path {
            Some(path) if path.is_absolute() => SimulatedJobMarket::from_file(path),
            Some(path) => SimulatedJobMarket::from_file(&self.root.join(path)),
            None => Ok(SimulatedJobMarket::default()),
        }
    }

    pub fn pretty_json(&self) -> bool {
        self.config.robot.format == RobotFormat::Json
    }
}
