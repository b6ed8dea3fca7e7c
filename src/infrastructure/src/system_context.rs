use std::env;
use sysinfo::System;

/// Local environment facts embedded into the prompt. Display context only,
/// never validated or trusted.
#[derive(Debug, Clone)]
pub struct SystemContext {
    pub username: String,
    pub hostname: String,
    pub platform: String,
    pub os_version: String,
    pub current_dir: String,
}

impl SystemContext {
    pub fn probe() -> Self {
        let username = env::var("USERNAME")
            .or_else(|_| env::var("USER"))
            .unwrap_or_else(|_| "unknown".to_string());
        let hostname = System::host_name().unwrap_or_else(|| "localhost".to_string());
        let platform = System::name().unwrap_or_else(|| env::consts::OS.to_string());
        let os_version = System::os_version().unwrap_or_default();
        let current_dir = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| ".".to_string());

        Self {
            username,
            hostname,
            platform,
            os_version,
            current_dir,
        }
    }
}
