use std::sync::Mutex;

/// Single-slot store for the bearer token used on outbound requests.
///
/// Written by login/refresh, read before every dispatch, cleared by logout
/// and by an unauthorized (401) response.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// Process-local credential slot.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    slot: Mutex<Option<String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.slot
            .lock()
            .expect("credential slot lock is not poisoned")
            .clone()
    }

    fn store(&self, token: &str) {
        let mut slot = self
            .slot
            .lock()
            .expect("credential slot lock is not poisoned");
        *slot = Some(token.to_owned());
    }

    fn clear(&self) {
        let mut slot = self
            .slot
            .lock()
            .expect("credential slot lock is not poisoned");
        *slot = None;
    }
}
