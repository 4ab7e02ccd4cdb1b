//! Behavioural coverage for configuration layering.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use ortho_config::OrthoConfig;
use sgrep_config::Config;

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const MANAGED_KEYS: [&str; 3] = [
    "SGREP_LOG_FILTER",
    "SGREP_ANCHORED_IDENTIFIERS",
    "SGREP_CONFIG_PATH",
];

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    previous_env: Vec<(&'static str, Option<OsString>)>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous_env = MANAGED_KEYS
            .iter()
            .map(|key| (*key, std::env::var_os(key)))
            .collect();
        for key in MANAGED_KEYS {
            // Environment mutation is `unsafe` in edition 2024; the mutex
            // serialises every test that touches these keys.
            unsafe { std::env::remove_var(key) };
        }

        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            cli_args: RefCell::new(vec![OsString::from("sgrep")]),
            previous_env,
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _guard: guard,
        }
    }

    fn write_config(&self, contents: &str) {
        let path = self.temp_dir.path().join("sgrep.toml");
        fs::write(&path, contents).expect("write configuration");
        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from("--config-path"));
        args.push(path.into_os_string());
    }

    fn set_env(&self, key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    fn load(&self) {
        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn config(&self) -> Config {
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        self.loaded
            .borrow()
            .clone()
            .expect("configuration should be loaded")
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        for (key, value) in self.previous_env.drain(..) {
            match value {
                Some(os_value) => unsafe { std::env::set_var(key, os_value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the log filter to \"{filter}\"")]
fn given_file(harness: &Harness, filter: String) {
    harness.write_config(&format!("log_filter = \"{filter}\"\n"));
}

#[given("the environment sets the log filter to \"{filter}\"")]
fn given_env_filter(harness: &Harness, filter: String) {
    harness.set_env("SGREP_LOG_FILTER", &filter);
}

#[given("the environment sets anchored identifiers to \"{value}\"")]
fn given_env_anchored(harness: &Harness, value: String) {
    harness.set_env("SGREP_ANCHORED_IDENTIFIERS", &value);
}

#[given("the command line sets the log filter to \"{filter}\"")]
fn given_cli_filter(harness: &Harness, filter: String) {
    let mut args = harness.cli_args.borrow_mut();
    args.push(OsString::from("--log-filter"));
    args.push(OsString::from(filter));
}

#[when("the configuration is loaded")]
fn when_loaded(harness: &Harness) {
    harness.load();
}

#[then("the log filter is \"{filter}\"")]
fn then_filter(harness: &Harness, filter: String) {
    assert_eq!(harness.config().log_filter(), filter);
}

#[then("identifier matching is anchored")]
fn then_anchored(harness: &Harness) {
    assert!(harness.config().anchored_identifiers());
}

#[then("identifier matching is not anchored")]
fn then_not_anchored(harness: &Harness) {
    assert!(!harness.config().anchored_identifiers());
}

#[scenario(
    path = "tests/features/configuration.feature",
    name = "Defaults apply when nothing is configured"
)]
fn defaults_apply(harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration.feature",
    name = "A configuration file overrides the defaults"
)]
fn file_overrides_defaults(harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration.feature",
    name = "The environment overrides the configuration file"
)]
fn environment_overrides_file(harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration.feature",
    name = "Command-line flags override the environment"
)]
fn cli_overrides_environment(harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration.feature",
    name = "Anchored matching can be switched on from the environment"
)]
fn anchored_from_environment(harness: Harness) {
    let _ = harness;
}
