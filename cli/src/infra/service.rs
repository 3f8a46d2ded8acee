//! Service-manager backends implementing the `ServiceManager` port.
//!
//! Linux queries systemd through `systemctl show`; Windows queries the Service
//! Control Manager through `sc.exe`. Output parsing is kept in pure functions.

use std::collections::HashMap;
use std::process::Output;

use anyhow::{Context, Result};
use stanza_manifest::PlatformFamily;

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::domain::check::ServiceFacts;

/// `sc.exe` exit code for `ERROR_SERVICE_DOES_NOT_EXIST`.
pub const SC_SERVICE_DOES_NOT_EXIST: i32 = 1060;

/// `UnitFileState` values that mean the unit starts without manual action.
const SYSTEMD_ENABLED_STATES: &[&str] = &[
    "enabled",
    "enabled-runtime",
    "static",
    "indirect",
    "generated",
    "alias",
];

fn stderr_or_stdout(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    }
}

// ── systemd ───────────────────────────────────────────────────────────────────

/// Parse `systemctl show --property=…` output.
///
/// Any `LoadState` other than `not-found` counts as installed, so a masked
/// unit is installed but not enabled. Running means `SubState=running`; an
/// exited oneshot unit is `active` but not running.
///
/// Returns `None` when `LoadState` is absent (not systemd output).
#[must_use]
pub fn parse_systemctl_show(stdout: &str) -> Option<ServiceFacts> {
    let props: HashMap<&str, &str> = stdout
        .lines()
        .filter_map(|line| line.trim().split_once('='))
        .collect();
    let load_state = *props.get("LoadState")?;
    let unit_file_state = props.get("UnitFileState").copied().unwrap_or_default();
    let sub_state = props.get("SubState").copied().unwrap_or_default();
    Some(ServiceFacts {
        installed: !load_state.is_empty() && load_state != "not-found",
        enabled: SYSTEMD_ENABLED_STATES.contains(&unit_file_state),
        running: sub_state == "running",
    })
}

/// systemd backend.
pub struct SystemdServiceManager<R> {
    runner: R,
}

impl<R: CommandRunner> SystemdServiceManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ServiceManager for SystemdServiceManager<R> {
    async fn query(&self, name: &str) -> Result<ServiceFacts> {
        let unit = if name.contains('.') {
            name.to_string()
        } else {
            format!("{name}.service")
        };
        let output = self
            .runner
            .run(
                "systemctl",
                &[
                    "show",
                    &unit,
                    "--property=LoadState,UnitFileState,SubState",
                ],
            )
            .await
            .context("cannot query systemd")?;
        if !output.status.success() {
            anyhow::bail!("systemctl show {unit} failed: {}", stderr_or_stdout(&output));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_systemctl_show(&stdout)
            .ok_or_else(|| anyhow::anyhow!("unexpected systemctl output for {unit}"))
    }
}

// ── Windows Service Control Manager ───────────────────────────────────────────

/// Value of a `KEY : value` line in `sc.exe` output.
fn sc_field<'a>(stdout: &'a str, key: &str) -> Option<&'a str> {
    stdout.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        (k.trim() == key).then(|| v.trim())
    })
}

/// Symbolic word after the numeric code, e.g. `4  RUNNING` → `RUNNING`.
fn sc_symbol(value: &str) -> Option<&str> {
    value.split_whitespace().nth(1)
}

/// Parse `sc.exe query` output into a running flag.
#[must_use]
pub fn parse_sc_query(stdout: &str) -> Option<bool> {
    let state = sc_field(stdout, "STATE").and_then(sc_symbol)?;
    Some(state == "RUNNING")
}

/// Parse `sc.exe qc` output into an enabled (starts automatically) flag.
#[must_use]
pub fn parse_sc_qc(stdout: &str) -> Option<bool> {
    let start_type = sc_field(stdout, "START_TYPE").and_then(sc_symbol)?;
    Some(matches!(
        start_type,
        "AUTO_START" | "BOOT_START" | "SYSTEM_START"
    ))
}

/// `sc.exe` reports a missing service through its exit code and as
/// `FAILED 1060:` in its output.
fn service_does_not_exist(output: &Output) -> bool {
    output.status.code() == Some(SC_SERVICE_DOES_NOT_EXIST)
        || String::from_utf8_lossy(&output.stdout)
            .contains(&format!("FAILED {SC_SERVICE_DOES_NOT_EXIST}:"))
}

/// Windows SCM backend.
pub struct ScServiceManager<R> {
    runner: R,
}

impl<R: CommandRunner> ScServiceManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn sc(&self, verb: &str, name: &str) -> Result<Option<String>> {
        let output = self
            .runner
            .run("sc.exe", &[verb, name])
            .await
            .context("cannot query the service control manager")?;
        if service_does_not_exist(&output) {
            return Ok(None);
        }
        if !output.status.success() {
            anyhow::bail!("sc.exe {verb} {name} failed: {}", stderr_or_stdout(&output));
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

impl<R: CommandRunner> ServiceManager for ScServiceManager<R> {
    async fn query(&self, name: &str) -> Result<ServiceFacts> {
        let Some(query) = self.sc("query", name).await? else {
            return Ok(ServiceFacts::default());
        };
        let running = parse_sc_query(&query)
            .ok_or_else(|| anyhow::anyhow!("unexpected sc.exe query output for {name}"))?;
        let Some(config) = self.sc("qc", name).await? else {
            return Ok(ServiceFacts::default());
        };
        let enabled = parse_sc_qc(&config)
            .ok_or_else(|| anyhow::anyhow!("unexpected sc.exe qc output for {name}"))?;
        Ok(ServiceFacts {
            installed: true,
            enabled,
            running,
        })
    }
}

// ── Host selection ────────────────────────────────────────────────────────────

#[cfg(windows)]
pub type HostServiceManager<R> = ScServiceManager<R>;
#[cfg(not(windows))]
pub type HostServiceManager<R> = SystemdServiceManager<R>;

/// Platform family whose service manager this binary can query.
#[cfg(windows)]
pub const HOST_SERVICE_FAMILY: PlatformFamily = PlatformFamily::Windows;
#[cfg(not(windows))]
pub const HOST_SERVICE_FAMILY: PlatformFamily = PlatformFamily::Linux;

/// Service manager for a target platform family.
///
/// A family other than the build target (e.g. `--platform windows` on Linux)
/// has no backend here, so every query fails and the service checks report
/// the manager as unavailable.
pub enum PlatformServiceManager<R> {
    Host(HostServiceManager<R>),
    Foreign(PlatformFamily),
}

impl<R: CommandRunner> ServiceManager for PlatformServiceManager<R> {
    async fn query(&self, name: &str) -> Result<ServiceFacts> {
        match self {
            Self::Host(manager) => manager.query(name).await,
            Self::Foreign(family) => {
                anyhow::bail!("no service manager for {family} on this host")
            }
        }
    }
}

/// Service manager for `family`, backed by the host's manager when the
/// family matches the build target.
pub fn service_manager_for<R: CommandRunner>(
    family: PlatformFamily,
    runner: R,
) -> PlatformServiceManager<R> {
    if family == HOST_SERVICE_FAMILY {
        PlatformServiceManager::Host(HostServiceManager::<R>::new(runner))
    } else {
        tracing::debug!(%family, host = %HOST_SERVICE_FAMILY, "no service manager for target family");
        PlatformServiceManager::Foreign(family)
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
