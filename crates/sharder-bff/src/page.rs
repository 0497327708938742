use askama::Template;

use crate::render::Directive;

pub const TITLE: &str = "Sharder";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Success,
    Warning,
    Error,
}

impl BannerLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerLevel::Success => "banner success",
            BannerLevel::Warning => "banner warning",
            BannerLevel::Error => "banner error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
    pub detail: Option<String>,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Success,
            message: message.into(),
            detail: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Warning,
            message: message.into(),
            detail: None,
        }
    }

    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            level: BannerLevel::Error,
            message: message.into(),
            detail,
        }
    }
}

#[derive(Debug, Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub title: &'static str,
    pub logged_in: bool,
    /// Echoed back into the sidebar so a failed attempt keeps the name.
    pub username: String,
    pub session_banner: Banner,
    pub pod_banner: Option<Banner>,
    pub pod: Vec<Directive>,
    pub action_banner: Option<Banner>,
}

impl DashboardPage {
    pub fn logged_out(username: String) -> Self {
        Self {
            title: TITLE,
            logged_in: false,
            username,
            session_banner: Banner::warning("Please enter valid credentials through the sidebar."),
            pod_banner: None,
            pod: Vec::new(),
            action_banner: None,
        }
    }

    pub fn logged_in(username: String) -> Self {
        Self {
            title: TITLE,
            logged_in: true,
            username,
            session_banner: Banner::success("Logged in successfully"),
            pod_banner: None,
            pod: Vec::new(),
            action_banner: None,
        }
    }
}
