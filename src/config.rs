use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use msgcore::model::user::UserId;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DisplayFromStr;
use url::Url;

const CONFIG_PATH: &str = "msgview/config.json";
const DEFAULT_API_BASE: &str = "https://discord.com/api/v9";

#[serde_as]
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: Url,
    /// Snapshot to inspect when none is given on the command line.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    /// Acts as this user instead of the snapshot's current user.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub acting_user: Option<UserId>,
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            snapshot: None,
            acting_user: None,
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        let Some(dirs) = BaseDirs::new() else {
            log::warn!("could not get basedirs");
            return None;
        };
        Some(dirs.config_dir().join(CONFIG_PATH))
    }

    pub fn exists() -> bool {
        Self::path().is_some_and(|path| path.exists())
    }

    pub fn load() -> Config {
        let Some(path) = Self::path() else {
            return Default::default();
        };
        let Ok(contents) = fs::read_to_string(path) else {
            log::warn!("could not read file");
            return Default::default();
        };

        let config = match serde_json::from_str(&contents) {
            Ok(x) => x,
            Err(e) => {
                log::warn!("error deserializing config: {e}");
                return Default::default();
            }
        };

        log::debug!("config: {config:?}");

        config
    }

    pub fn save(&self) {
        let Some(path) = Self::path() else {
            return;
        };

        let json_str = match serde_json::to_string_pretty(&self) {
            Ok(x) => x,
            Err(e) => {
                log::warn!("could not serialize config: {e}");
                return;
            }
        };

        if let Some(ancestor) = path.parent() {
            if let Err(e) = fs::create_dir_all(ancestor) {
                log::warn!(
                    "could not create {path}: {e}",
                    path = path.as_os_str().to_string_lossy()
                );
                return;
            }
        }

        if let Err(e) = fs::write(path, json_str) {
            log::warn!("could not write config file: {e}");
        }
    }
}
