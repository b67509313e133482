use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Platform error codes carried by [`AuthenticationOutcome::Errored`].
pub mod error_codes {
    pub const HW_UNAVAILABLE: i32 = 1;
    pub const TIMEOUT: i32 = 3;
    pub const CANCELED: i32 = 5;
    pub const LOCKOUT: i32 = 7;
    pub const LOCKOUT_PERMANENT: i32 = 9;
    pub const USER_CANCELED: i32 = 10;
    pub const NEGATIVE_BUTTON: i32 = 13;
}

/// One callback from the system prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationOutcome {
    /// The presented credential was recognized.
    Succeeded,
    /// One attempt was rejected; the prompt stays up for another try.
    Failed,
    /// The prompt gave up and dismissed itself.
    Errored { code: i32, message: String },
}

/// What the flow does after an outcome has been announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Leave the lock screen behind.
    Advance,
    /// Keep listening; the prompt is still up.
    AwaitRetry,
    /// The prompt is gone, the user stays where they are.
    End,
}

impl AuthenticationOutcome {
    /// Terminal outcomes dismiss the prompt; only `Failed` leaves it up.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AuthenticationOutcome::Failed)
    }

    pub fn disposition(&self) -> Disposition {
        match self {
            AuthenticationOutcome::Succeeded => Disposition::Advance,
            AuthenticationOutcome::Failed => Disposition::AwaitRetry,
            AuthenticationOutcome::Errored { .. } => Disposition::End,
        }
    }

    /// The message shown to the user for this outcome.
    pub fn user_message(&self) -> String {
        match self {
            AuthenticationOutcome::Succeeded => "Authentication succeeded!".to_string(),
            AuthenticationOutcome::Failed => "Authentication failed".to_string(),
            AuthenticationOutcome::Errored { message, .. } => {
                format!("Authentication error: {message}")
            }
        }
    }
}

impl fmt::Display for AuthenticationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthenticationOutcome::Succeeded => write!(f, "succeeded"),
            AuthenticationOutcome::Failed => write!(f, "failed"),
            AuthenticationOutcome::Errored { code, message } => {
                write!(f, "errored ({code}: {message})")
            }
        }
    }
}

/// Creates the reporting half handed to the platform and the consuming half
/// kept by the flow.
pub fn outcome_channel() -> (OutcomeReporter, PromptSession) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OutcomeReporter { tx }, PromptSession { rx })
}

/// Held by the prompt presenter. Failed attempts can be reported any number
/// of times; the terminal reporters take `self`, so a session carries at most
/// one terminal outcome. Dropping the reporter ends the session without one.
pub struct OutcomeReporter {
    tx: mpsc::UnboundedSender<AuthenticationOutcome>,
}

impl OutcomeReporter {
    pub fn report_failed(&self) {
        let _ = self.tx.send(AuthenticationOutcome::Failed);
    }

    pub fn report_succeeded(self) {
        let _ = self.tx.send(AuthenticationOutcome::Succeeded);
    }

    pub fn report_errored(self, code: i32, message: impl Into<String>) {
        let _ = self.tx.send(AuthenticationOutcome::Errored {
            code,
            message: message.into(),
        });
    }
}

/// Stream of outcomes from one presented prompt.
pub struct PromptSession {
    rx: mpsc::UnboundedReceiver<AuthenticationOutcome>,
}

impl PromptSession {
    /// Session with a pre-recorded outcome sequence, for simulated platforms.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = AuthenticationOutcome>,
    {
        let (reporter, session) = outcome_channel();
        for outcome in outcomes {
            let _ = reporter.tx.send(outcome);
        }
        session
    }

    /// The next outcome, or `None` once the prompt is gone for good.
    pub async fn next_outcome(&mut self) -> Option<AuthenticationOutcome> {
        self.rx.recv().await
    }
}
