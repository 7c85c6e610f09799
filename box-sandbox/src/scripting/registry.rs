// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Script registry
//!
//! Holds the registered script hooks and drives them against a
//! [`SandboxCommands`] implementation. Registration checks name
//! uniqueness and API version compatibility; a hook that fails at run
//! time is logged and skipped without affecting the others.

use crate::error::{Result, SandboxError};
use crate::scripting::api::{SandboxCommands, ScriptHook, SCRIPT_API_VERSION};
use semver::Version;

/// Registry for managing and running script hooks
pub struct ScriptRegistry {
    hooks: Vec<Box<dyn ScriptHook>>,
    started: bool,
    frame: u64,
    failures: usize,
}

impl ScriptRegistry {
    /// Create a new script registry
    pub fn new() -> Self {
        ScriptRegistry {
            hooks: Vec::new(),
            started: false,
            frame: 0,
            failures: 0,
        }
    }

    /// Register a script hook
    ///
    /// # Errors
    ///
    /// - A hook with the same name is already registered
    /// - The hook's API version is incompatible
    /// - The registry has already started
    pub fn register(&mut self, hook: Box<dyn ScriptHook>) -> Result<()> {
        if self.started {
            return Err(SandboxError::ScriptRegistration(
                "cannot register scripts after start".to_string(),
            ));
        }

        let name = hook.name().to_string();
        if self.hooks.iter().any(|h| h.name() == name) {
            return Err(SandboxError::ScriptRegistration(format!(
                "script '{}' is already registered",
                name
            )));
        }

        let api_version = hook.api_version();
        if !is_version_compatible(api_version, SCRIPT_API_VERSION) {
            return Err(SandboxError::ScriptRegistration(format!(
                "script '{}' API version {} is incompatible with host API version {}",
                name, api_version, SCRIPT_API_VERSION
            )));
        }

        log::info!("registered script '{}' v{}", name, hook.version());
        self.hooks.push(hook);
        Ok(())
    }

    /// Run every hook's `on_start` in registration order
    ///
    /// Subsequent calls do nothing. Returns the number of hooks that failed.
    pub fn start(&mut self, commands: &mut dyn SandboxCommands) -> usize {
        if self.started {
            return 0;
        }
        self.started = true;

        let mut failed = 0;
        for hook in &mut self.hooks {
            if let Err(e) = hook.on_start(commands) {
                log::warn!("script '{}' failed to start: {}", hook.name(), e);
                failed += 1;
            }
        }
        self.failures += failed;
        failed
    }

    /// Run every hook's `on_frame` for the next frame
    ///
    /// Starts the registry first if needed. Returns the number of hooks
    /// that failed this frame.
    pub fn run_frame(&mut self, commands: &mut dyn SandboxCommands, dt: f64) -> usize {
        let start_failures = self.start(commands);

        let mut failed = 0;
        for hook in &mut self.hooks {
            if let Err(e) = hook.on_frame(commands, self.frame, dt) {
                log::warn!("script '{}' failed on frame {}: {}", hook.name(), self.frame, e);
                failed += 1;
            }
        }

        self.failures += failed;
        self.frame += 1;
        start_failures + failed
    }

    /// Get the number of registered hooks
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Names of the registered hooks in run order
    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Total hook failures since creation
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Check if the registry has started
    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl Default for ScriptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a script API version is compatible with the host
///
/// Uses semantic versioning rules:
/// - Major version must match
/// - For major version 0.x.y, minor versions must match (breaking changes)
/// - For major version >= 1, minor version can be less than or equal
/// - Patch version is ignored
fn is_version_compatible(script_version: &str, host_version: &str) -> bool {
    let (Ok(script), Ok(host)) = (Version::parse(script_version), Version::parse(host_version))
    else {
        return false;
    };

    if script.major != host.major {
        return false;
    }

    if script.major != 0 {
        script.minor <= host.minor
    } else {
        script.minor == host.minor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_compatibility() {
        assert!(is_version_compatible("0.2.0", "0.2.0"));
        assert!(is_version_compatible("0.2.5", "0.2.1"));
        assert!(!is_version_compatible("0.1.0", "0.2.0"));
        assert!(!is_version_compatible("0.3.0", "0.2.0"));

        assert!(is_version_compatible("1.0.0", "1.2.0"));
        assert!(!is_version_compatible("1.3.0", "1.2.0"));
        assert!(!is_version_compatible("2.0.0", "1.9.0"));

        assert!(!is_version_compatible("invalid", "1.0.0"));
        assert!(!is_version_compatible("1.0.0", "invalid"));
    }

    #[test]
    fn test_registry_creation() {
        let registry = ScriptRegistry::new();
        assert_eq!(registry.hook_count(), 0);
        assert!(!registry.is_started());
        assert_eq!(registry.frame(), 0);
    }
}
