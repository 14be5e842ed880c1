//! Environment isolation for tests that read `GRAF_GLUON_TOP_DIR`.

use std::env;
use std::ffi::OsString;
use std::sync::Mutex;

/// Held by every test that touches process environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Restores one variable to its prior state when dropped.
pub struct EnvVarGuard {
    key: &'static str,
    saved: Option<OsString>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        let guard = Self::save(key);
        write_var(key, Some(value.as_ref()));
        guard
    }

    pub fn remove(key: &'static str) -> Self {
        let guard = Self::save(key);
        write_var(key, None);
        guard
    }

    fn save(key: &'static str) -> Self {
        Self {
            key,
            saved: env::var_os(key),
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        write_var(self.key, self.saved.as_deref());
    }
}

// Callers hold ENV_LOCK, so no other test thread reads the environment concurrently.
#[allow(unsafe_code)]
fn write_var(key: &str, value: Option<&std::ffi::OsStr>) {
    unsafe {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}
