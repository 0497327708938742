use sharder_common::MutationResult;
use sharder_runpod::{PodApi, PodError};

use crate::config::Config;
use crate::page::{Banner, DashboardPage};
use crate::render::render;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodAction {
    Start,
    Stop,
}

impl PodAction {
    pub fn verb(self) -> &'static str {
        match self {
            PodAction::Start => "start",
            PodAction::Stop => "stop",
        }
    }
}

/// What triggered the current render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    View,
    Refresh,
    Action(PodAction),
}

/// Builds the page for one request.
///
/// Logged-out callers get the login prompt and nothing touches the remote
/// API. Logged-in callers get a fresh pod snapshot on every pass; an action,
/// if any, runs first so the snapshot reflects it.
pub async fn build_page(
    pods: &dyn PodApi,
    config: &Config,
    state: SessionState,
    event: PageEvent,
    username: String,
) -> DashboardPage {
    if state == SessionState::LoggedOut {
        return DashboardPage::logged_out(username);
    }

    let mut page = DashboardPage::logged_in(username);

    if let PageEvent::Action(action) = event {
        page.action_banner = Some(run_action(pods, config, action).await);
    }

    match pods.pod_info(&config.pod_id).await {
        Ok(pod) => {
            page.pod = render(&pod);
            if event == PageEvent::Refresh {
                page.pod_banner = Some(Banner::success("Refreshed Pod Info"));
            }
        }
        Err(e) => {
            tracing::warn!(pod_id=%config.pod_id, error=%e, "failed to load pod info");
            page.pod_banner = Some(Banner::error("Failed to load pod info.", Some(describe(&e))));
        }
    }

    page
}

pub async fn run_action(pods: &dyn PodApi, config: &Config, action: PodAction) -> Banner {
    tracing::info!(pod_id=%config.pod_id, action = action.verb(), "pod action requested");
    let result = match action {
        PodAction::Start => pods.resume_pod(&config.pod_id, config.gpu_count).await,
        PodAction::Stop => pods.stop_pod(&config.pod_id).await,
    };
    action_banner(action, result)
}

pub fn action_banner(action: PodAction, result: Result<MutationResult, PodError>) -> Banner {
    let verb = action.verb();
    match result {
        Ok(res) => match res.errors() {
            Some(errors) => {
                tracing::warn!(action = verb, errors=%errors, "pod action rejected");
                Banner::error(format!("Failed to {verb} pod."), Some(errors.to_string()))
            }
            None => Banner::success(format!("Pod {verb} request successfully sent.")),
        },
        Err(e) => {
            tracing::warn!(action = verb, error=%e, "pod action failed");
            Banner::error(format!("Failed to {verb} pod."), Some(describe(&e)))
        }
    }
}

fn describe(e: &PodError) -> String {
    match e.detail() {
        Some(detail) => format!("{e}\n{detail}"),
        None => e.to_string(),
    }
}
