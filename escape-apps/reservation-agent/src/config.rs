//!  Escape Reservation Agent
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Engine configuration

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::earth_escape_adapter::EARTH_ESCAPE_BASE_URL;
use crate::zero_world_adapter::ZERO_WORLD_BASE_URL;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-request timeout applied by the HTTP client
    pub request_timeout_secs: u64,

    /// TCP/TLS connect timeout
    pub connect_timeout_secs: u64,

    /// Whole-call bound on one submission, queueing included
    pub submission_timeout_secs: u64,

    /// Submissions allowed in flight at once
    pub max_concurrent_submissions: u64,

    /// Optional cap on submissions started per second
    pub submissions_per_second: Option<u64>,

    /// Cap on raw response text embedded in failure messages
    pub max_error_body_chars: usize,

    pub zero_world_base_url: String,

    pub earth_escape_base_url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 15,
            connect_timeout_secs: 10,
            submission_timeout_secs: 30,
            max_concurrent_submissions: 4,
            submissions_per_second: None,
            max_error_body_chars: 500,
            zero_world_base_url: ZERO_WORLD_BASE_URL.to_string(),
            earth_escape_base_url: EARTH_ESCAPE_BASE_URL.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file, or defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            Ok(config)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn submission_timeout(&self) -> Duration {
        Duration::from_secs(self.submission_timeout_secs.max(1))
    }
}
