//! In-process fakes for the vault's collaborator traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use holt::core::credentials::CredentialPrompt;
use holt::core::gate::PresenceGate;
use holt::core::probe::{LoginProbe, ProbeVerdict};
use holt::core::types::Credential;
use holt::error::Result;

/// Gate that approves every challenge and counts them.
#[derive(Default)]
pub struct ApprovingGate {
    pub challenges: AtomicUsize,
}

impl PresenceGate for ApprovingGate {
    fn confirm(&self, _reason: &str) -> Result<bool> {
        self.challenges.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

/// Gate that declines every challenge and counts them.
#[derive(Default)]
pub struct DenyingGate {
    pub challenges: AtomicUsize,
}

impl PresenceGate for DenyingGate {
    fn confirm(&self, _reason: &str) -> Result<bool> {
        self.challenges.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }
}

/// Probe returning a fixed verdict, recording every pair it was shown.
pub struct ScriptedProbe {
    verdict: ProbeVerdict,
    pub seen: Mutex<Vec<(String, String)>>,
}

impl ScriptedProbe {
    pub fn passing() -> Self {
        Self {
            verdict: ProbeVerdict::Pass,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            verdict: ProbeVerdict::Fail {
                reason: reason.to_string(),
            },
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl LoginProbe for ScriptedProbe {
    fn check(&self, username: &str, password: &str) -> Result<ProbeVerdict> {
        self.seen
            .lock()
            .expect("probe log lock")
            .push((username.to_string(), password.to_string()));
        Ok(self.verdict.clone())
    }
}

/// Prompt that hands out one fixed credential, or declines.
pub struct ScriptedPrompt {
    answer: Option<Credential>,
    pub requests: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn answering(username: &str, password: &str) -> Self {
        Self {
            answer: Some(Credential::new(username, password)),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: None,
            requests: AtomicUsize::new(0),
        }
    }
}

impl CredentialPrompt for ScriptedPrompt {
    fn request(&self, _account: &str) -> Result<Option<Credential>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}
