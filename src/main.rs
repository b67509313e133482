use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use bioprompt::outcome::error_codes;
use bioprompt::{
    enroll_intent, outcome_channel, AuthFlow, AuthenticationOutcome, AvailabilityStatus,
    ConfirmRequest, Confirmation, FlowError, FlowSettings, IntentTarget, LaunchResult, Notifier,
    PlatformAuthenticator, PromptConfig, PromptSession, ScreenId, ScreenNavigator,
    SettingsNavigator,
};

/// Simulated device: answers availability checks from a shared cell and
/// feeds prompts from a scripted outcome sequence, one outcome per tick.
struct SimPlatform {
    availability: Arc<Mutex<AvailabilityStatus>>,
    script: Mutex<VecDeque<AuthenticationOutcome>>,
    tick: Duration,
}

impl PlatformAuthenticator for SimPlatform {
    fn can_authenticate(&self, _allowed: bioprompt::Authenticators) -> AvailabilityStatus {
        *self.availability.lock().unwrap()
    }

    fn authenticate(&self, config: &PromptConfig) -> PromptSession {
        println!("[prompt] {}", config.title());
        if let Some(subtitle) = config.subtitle() {
            println!("[prompt] {subtitle}");
        }
        let outcomes: Vec<AuthenticationOutcome> =
            self.script.lock().unwrap().drain(..).collect();
        let tick = self.tick;
        let (reporter, session) = outcome_channel();
        tokio::spawn(async move {
            for outcome in outcomes {
                tokio::time::sleep(tick).await;
                match outcome {
                    AuthenticationOutcome::Failed => reporter.report_failed(),
                    AuthenticationOutcome::Succeeded => {
                        reporter.report_succeeded();
                        return;
                    }
                    AuthenticationOutcome::Errored { code, message } => {
                        reporter.report_errored(code, message);
                        return;
                    }
                }
            }
        });
        session
    }
}

/// Pretends to run the settings screen; a completed enrollment flips the
/// shared availability cell so later checks see the new credential.
struct SimSettingsNavigator {
    availability: Arc<Mutex<AvailabilityStatus>>,
    result: LaunchResult,
}

#[async_trait]
impl SettingsNavigator for SimSettingsNavigator {
    async fn launch(&self, target: &IntentTarget) -> LaunchResult {
        println!("[settings] launching {target}");
        if self.result == LaunchResult::Ok {
            *self.availability.lock().unwrap() = AvailabilityStatus::Available;
        }
        self.result
    }
}

struct ConsoleScreens;

impl ScreenNavigator for ConsoleScreens {
    fn advance_to(&self, screen: ScreenId) {
        println!("[screen] now showing: {screen}");
    }
}

struct ConsoleNotifier {
    choice: Confirmation,
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("[toast] {message}");
    }

    async fn confirm(&self, request: &ConfirmRequest) -> Result<Confirmation, FlowError> {
        println!(
            "[dialog] {} [{}] / [{}]",
            request.message, request.accept_label, request.dismiss_label
        );
        let answer = match self.choice {
            Confirmation::Accepted => &request.accept_label,
            Confirmation::Dismissed => &request.dismiss_label,
        };
        println!("[dialog] chose: {answer}");
        Ok(self.choice)
    }
}

fn parse_outcome(token: &str) -> Option<AuthenticationOutcome> {
    let mut parts = token.splitn(3, ':');
    match parts.next()?.trim() {
        "failed" => Some(AuthenticationOutcome::Failed),
        "succeeded" => Some(AuthenticationOutcome::Succeeded),
        "errored" => {
            let code = parts
                .next()
                .and_then(|c| c.trim().parse().ok())
                .unwrap_or(error_codes::CANCELED);
            let message = parts.next().unwrap_or("Authentication was cancelled");
            Some(AuthenticationOutcome::Errored {
                code,
                message: message.to_string(),
            })
        }
        _ => None,
    }
}

fn scripted_outcomes() -> VecDeque<AuthenticationOutcome> {
    let raw = env::var("BIOPROMPT_SIM_OUTCOMES").unwrap_or_else(|_| "failed,succeeded".to_string());
    raw.split(',')
        .filter(|token| !token.trim().is_empty())
        .filter_map(|token| match parse_outcome(token) {
            Some(outcome) => Some(outcome),
            None => {
                log::warn!("ignoring unknown outcome token {token:?}");
                None
            }
        })
        .collect()
}

fn scripted_launch_result() -> LaunchResult {
    match env::var("BIOPROMPT_SIM_SETTINGS_RESULT").as_deref() {
        Ok("ok") | Err(_) => LaunchResult::Ok,
        Ok("cancelled") | Ok("canceled") => LaunchResult::Cancelled,
        Ok(other) => match other.parse() {
            Ok(code) => LaunchResult::Other(code),
            Err(_) => {
                log::warn!("ignoring BIOPROMPT_SIM_SETTINGS_RESULT={other}");
                LaunchResult::Ok
            }
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), FlowError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bioprompt=debug")),
        )
        .with_target(true)
        .with_line_number(true)
        .init();

    let mut settings = match env::var("BIOPROMPT_SETTINGS") {
        Ok(path) => FlowSettings::load(&path)?,
        Err(_) => FlowSettings::default(),
    };
    settings.apply_env();

    let availability = Arc::new(Mutex::new(
        env::var("BIOPROMPT_SIM_AVAILABILITY")
            .map(|raw| AvailabilityStatus::from(raw.as_str()))
            .unwrap_or(AvailabilityStatus::Available),
    ));
    let tick = env::var("BIOPROMPT_SIM_DELAY_MS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(150);
    let choice = match env::var("BIOPROMPT_SIM_CONFIRM").as_deref() {
        Ok("dismiss") => Confirmation::Dismissed,
        _ => Confirmation::Accepted,
    };

    let platform = Arc::new(SimPlatform {
        availability: availability.clone(),
        script: Mutex::new(scripted_outcomes()),
        tick: Duration::from_millis(tick),
    });
    let settings_nav = Arc::new(SimSettingsNavigator {
        availability,
        result: scripted_launch_result(),
    });
    let notifier = Arc::new(ConsoleNotifier { choice });

    let mut flow = AuthFlow::new(
        settings,
        platform,
        settings_nav,
        Arc::new(ConsoleScreens),
        notifier.clone(),
    );

    println!("[screen] now showing: lock");
    flow.configure()?;

    if env::var("BIOPROMPT_DIAGNOSTICS").is_ok() {
        let status = flow.availability();
        println!("[diag] availability: {status} (code {})", status.code());
        notifier.notify(status.user_message());
        if let Some(config) = flow.prompt_config() {
            println!("[diag] authenticators: {}", config.allowed());
            println!(
                "[diag] enrollment target: {}",
                enroll_intent(flow.settings().api_level, config.allowed())
            );
        }
    }

    let state = flow.trigger().await;
    println!("[flow] finished: {state}");
    Ok(())
}
