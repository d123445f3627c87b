use bloodaid_client::{
    ClientConfig, ConfigError, Env,
    config::{DEFAULT_API_URL, DEFAULT_TIMEOUT},
};
use serial_test::serial;
use std::{env, panic};

const VARS: [&str; 4] = [
    "APP_ENV",
    "BLOODAID_API_URL",
    "IMGBB_API_KEY",
    "STRIPE_PUBLISHABLE_KEY",
];

// --- Setup/Teardown Utilities ---

/// Runs `test` with a clean slate for `VARS` and restores the originals afterward.
fn run_with_env<T, R>(test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> =
        VARS.iter().map(|&var| (var, env::var(var).ok())).collect();

    unsafe {
        for var in VARS {
            env::remove_var(var);
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(key, val);
            } else {
                env::remove_var(key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_production_requires_every_key() {
    let result = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("BLOODAID_API_URL", "https://api.bloodaid.example");
            env::set_var("IMGBB_API_KEY", "imgbb");
        }
        ClientConfig::load()
    });

    assert_eq!(
        result.unwrap_err(),
        ConfigError::Missing("STRIPE_PUBLISHABLE_KEY")
    );
}

#[test]
#[serial]
fn test_production_rejects_blank_values() {
    let result = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("BLOODAID_API_URL", "   ");
            env::set_var("IMGBB_API_KEY", "imgbb");
            env::set_var("STRIPE_PUBLISHABLE_KEY", "pk_live");
        }
        ClientConfig::load()
    });

    assert_eq!(result.unwrap_err(), ConfigError::Missing("BLOODAID_API_URL"));
}

#[test]
#[serial]
fn test_production_loads_when_complete() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("BLOODAID_API_URL", "https://api.bloodaid.example/");
            env::set_var("IMGBB_API_KEY", "imgbb");
            env::set_var("STRIPE_PUBLISHABLE_KEY", "pk_live");
        }
        ClientConfig::load()
    })
    .expect("complete production config");

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.api_url, "https://api.bloodaid.example");
    assert_eq!(config.imgbb_api_key, "imgbb");
    assert_eq!(config.stripe_publishable_key, "pk_live");
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
}

#[test]
#[serial]
fn test_local_env_defaults() {
    let config = run_with_env(ClientConfig::load).expect("local config never fails");

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert!(config.imgbb_api_key.is_empty());
    assert!(config.stripe_publishable_key.is_empty());
}

#[test]
#[serial]
fn test_local_env_honours_overrides() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("BLOODAID_API_URL", "http://10.0.0.5:5000//");
            env::set_var("IMGBB_API_KEY", "local-key");
        }
        ClientConfig::load()
    })
    .expect("local config");

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.api_url, "http://10.0.0.5:5000");
    assert_eq!(config.imgbb_api_key, "local-key");
}

#[test]
fn test_default_is_test_safe() {
    let config = ClientConfig::default();
    assert_eq!(config.env, Env::Local);
    assert_eq!(config.timeout.as_secs(), 8);
    assert!(!config.imgbb_api_key.is_empty());
}
