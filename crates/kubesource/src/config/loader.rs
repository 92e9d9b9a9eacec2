use std::path::{Component, Path};

use crate::config::schema::{Config, RawConfig, CONFIG_FILE_NAME};
use crate::error::ConfigError;

/// Loads and validates the `kubesource.yaml` file of `dir`.
pub fn load_config<P: AsRef<Path>>(dir: P) -> Result<Config, ConfigError> {
    let dir = dir.as_ref();
    let path = dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
        path: path.clone(),
        source: e,
    })?;

    load_config_from_str(&content, dir)
}

/// Parses and validates config content; `dir` is only used for error context.
pub fn load_config_from_str(content: &str, dir: &Path) -> Result<Config, ConfigError> {
    let raw: RawConfig = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
        path: dir.join(CONFIG_FILE_NAME),
        source: e,
    })?;

    let config = raw.into_config();
    validate_config(&config).map_err(|message| ConfigError::Validation {
        path: dir.join(CONFIG_FILE_NAME),
        message,
    })?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), String> {
    if config.sources.is_empty() {
        return Err("at least one source is required".to_string());
    }

    for (index, source) in config.sources.iter().enumerate() {
        if source.source_dir.trim().is_empty() {
            return Err(format!("sources[{}]: sourceDir is required", index));
        }

        if source.targets.is_empty() {
            return Err(format!(
                "sources[{}] ({}): at least one target is required",
                index, source.source_dir
            ));
        }

        if is_rooted(Path::new(&source.source_dir)) {
            return Err(format!(
                "sources[{}] ({}): sourceDir must be relative to the config directory",
                index, source.source_dir
            ));
        }

        for (position, target) in source.targets.iter().enumerate() {
            if target.directory.trim().is_empty() {
                return Err(format!(
                    "sources[{}] ({}): targets[{}]: directory is required",
                    index, source.source_dir, position
                ));
            }

            // Targets are removed before writing.
            if !is_strictly_below(Path::new(&target.directory)) {
                return Err(format!(
                    "sources[{}] ({}): targets[{}] ({}): directory must be a subdirectory of the config directory",
                    index, source.source_dir, position, target.directory
                ));
            }
        }
    }

    Ok(())
}

fn is_rooted(path: &Path) -> bool {
    matches!(
        path.components().next(),
        Some(Component::RootDir | Component::Prefix(_))
    )
}

/// Returns true if `path`, taken relative to some base, names a directory
/// strictly inside that base without passing above it.
fn is_strictly_below(path: &Path) -> bool {
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => match depth.checked_sub(1) {
                Some(parent) => depth = parent,
                None => return false,
            },
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    depth > 0
}
