//! `ConfigStore` backed by `~/.ccdeploy/config.yaml`.
//!
//! `CCDEPLOY_CONFIG` points the store at another file. Values read back are
//! checked with the same validators as `ccdeploy config set`. A hand-edited
//! value that fails them is dropped with a warning naming the file and key,
//! so the default applies and `config set` can still repair the file.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::application::ports::ConfigStore;
use crate::domain::config::{DeployConfig, ServerConfig, validate_config_value};

const CONFIG_ENV: &str = "CCDEPLOY_CONFIG";

const HEADER: &str = "# ccdeploy settings. Change them with `ccdeploy config set <KEY> <VALUE>`.\n";

pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<DeployConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(DeployConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let mut config: DeployConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        drop_invalid(&mut config, &path);
        config.server.url = config.server.url.trim_end_matches('/').to_string();
        Ok(config)
    }

    fn save(&self, config: &DeployConfig) -> Result<()> {
        let path = self.path()?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;

        let body = serde_yaml::to_string(config).context("cannot serialize config")?;
        // tempfile creates the staged file owner-only, which suits a settings file.
        let mut staged = tempfile::Builder::new()
            .prefix(".config-")
            .tempfile_in(dir)
            .with_context(|| format!("cannot write {}", path.display()))?;
        staged
            .write_all(HEADER.as_bytes())
            .and_then(|()| staged.write_all(body.as_bytes()))
            .with_context(|| format!("cannot write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            staged
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }

        staged
            .persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("cannot write {}", path.display()))?;
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(val) if !val.is_empty() => Ok(PathBuf::from(val)),
            _ => {
                let home = dirs::home_dir()
                    .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
                Ok(home.join(".ccdeploy").join("config.yaml"))
            }
        }
    }
}

fn drop_invalid(config: &mut DeployConfig, path: &Path) {
    if let Err(err) = validate_config_value("server.url", &config.server.url) {
        warn!(file = %path.display(), key = "server.url", error = %err, "ignoring invalid setting");
        config.server = ServerConfig::default();
    }
    let bad_dir = config
        .export
        .dir
        .as_deref()
        .and_then(|dir| validate_config_value("export.dir", dir).err());
    if let Some(err) = bad_dir {
        warn!(file = %path.display(), key = "export.dir", error = %err, "ignoring invalid setting");
        config.export.dir = None;
    }
}
