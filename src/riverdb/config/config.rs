use std::mem::MaybeUninit;
use std::path::PathBuf;

use serde::Deserialize;

use crate::riverdb::config::postgres::XRouterConfig;
use crate::riverdb::common::{Error, Result};

#[derive(Deserialize)]
pub struct Settings {
    /// config_path is the path of the loaded config file
    #[serde(skip_deserializing)]
    config_path: PathBuf,
    /// app_name is used as the application name to identify connected sessions if the
    /// client doesn't provide one of its own
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// recv_buffer_size is the default size for (user-space) buffers used to read from TCP sockets
    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: u32,
    /// xrouter holds the routing cluster topology and the four configured SQL templates
    pub xrouter: XRouterConfig,
}

fn default_app_name() -> String {
    "riverdb".to_string()
}

const fn default_recv_buffer_size() -> u32 {
    32 * 1024
}

pub(crate) static mut SETTINGS: MaybeUninit<Settings> = MaybeUninit::uninit();

pub fn config() -> &'static Settings {
    unsafe { &*SETTINGS.as_ptr() }
}

impl Settings {
    pub(crate) fn load(&mut self, path: PathBuf) -> Result<()> {
        self.config_path = path;
        if self.recv_buffer_size < 4096 {
            self.recv_buffer_size = default_recv_buffer_size();
        }
        if self.recv_buffer_size > 1024 * 1024 {
            return Err(Error::new("recv_buffer_size cannot be > 1MB"));
        }
        self.recv_buffer_size = self.recv_buffer_size.next_power_of_two();
        self.xrouter.load()
    }
}
