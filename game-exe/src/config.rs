//! User configuration options.

use crate::{BASE_DIR, CLIOptions};
use dirs::config_dir;
use gameplay::log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::{File, OpenOptions, create_dir},
    io::{Read, Write},
    path::PathBuf,
};

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> PathBuf {
    let mut dir =
        config_dir().unwrap_or_else(|| panic!("{}: Couldn't open user config dir", LOG_TAG));
    dir.push(BASE_DIR);
    if !dir.exists() {
        create_dir(&dir)
            .unwrap_or_else(|e| panic!("{}: Couldn't create {:?}: {}", LOG_TAG, dir, e));
    }
    dir.push("user.toml");
    dir
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub width: u32,
    pub height: u32,
    /// Field of view in degrees
    pub fov: u32,
    /// Screen columns per cast ray, 1-4
    pub strip_width: usize,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov: 90,
            strip_width: 2,
        }
    }
}

impl UserConfig {
    /// `load` will attempt to read the config, and panic if errored
    pub fn load() -> Self {
        let path = get_cfg_file();

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.clone())
            .unwrap_or_else(|e| panic!("Couldn't open {:?}, {}", path, e));
        let mut buf = String::new();
        if let Ok(read_len) = file.read_to_string(&mut buf) {
            if read_len == 0 {
                return UserConfig::create_default(&mut file);
            } else {
                if let Ok(data) = toml::from_str(&buf) {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return data;
                }
                warn!("Could not deserialise {:?} recreating config", path);
            }
        }
        UserConfig::create_default(&mut file)
    }

    fn create_default(file: &mut File) -> Self {
        let config = UserConfig::default();
        info!("Created default user config file");
        // Should be okay to unwrap this as is since it is a Default
        let data = toml::to_string(&config).unwrap();
        file.write_all(data.as_bytes())
            .unwrap_or_else(|_| panic!("Could not write {:?}", get_cfg_file()));
        info!("Saved user config to {:?}", get_cfg_file());
        config
    }

    pub fn write(&self) {
        let mut file = File::create(get_cfg_file()).expect("Couldn't overwrite config");
        let data = toml::to_string_pretty(self).expect("Serialise config failed");
        file.write_all(data.as_bytes())
            .unwrap_or_else(|err| error!("Could not write config: {}", err));
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        if cli.width != 0 && cli.width != self.width {
            self.width = cli.width;
        } else {
            cli.width = self.width;
        }

        if cli.height != 0 && cli.height != self.height {
            self.height = cli.height;
        } else {
            cli.height = self.height;
        }

        if cli.fov != 0 && cli.fov != self.fov {
            self.fov = cli.fov;
        } else {
            cli.fov = self.fov;
        }

        if cli.strip_width != 0 && cli.strip_width != self.strip_width {
            self.strip_width = cli.strip_width.clamp(1, 4);
        } else {
            cli.strip_width = self.strip_width;
        }
    }
}
