//! Server-rendered pages.
//!
//! Templates are compiled into the binary and rendered with minijinja.
//! HTML auto-escaping is on for every `.html` template.

use chrono::{DateTime, Utc};
use minijinja::{Environment, UndefinedBehavior, Value};
use serde::Serialize;

use clubsite_types::chat::{MEMBERS_LINK_LABEL, MEMBERS_ROUTE};
use clubsite_types::config::SiteConfig;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("members.html", include_str!("../../templates/members.html")),
    ("events.html", include_str!("../../templates/events.html")),
    ("article.html", include_str!("../../templates/article.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
];

/// Site-wide values every page sees.
#[derive(Debug, Clone, Serialize)]
struct SiteGlobals {
    club_name: String,
    assistant_name: String,
    greeting: String,
    history_window: usize,
    login_path: String,
    members_route: &'static str,
    members_label: &'static str,
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new(config: &SiteConfig) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_filter("date", |value: String| format_timestamp(&value, "%d.%m.%Y"));
        env.add_filter("datetime", |value: String| {
            format_timestamp(&value, "%d.%m.%Y %H:%M")
        });
        env.add_global(
            "site",
            Value::from_serialize(SiteGlobals {
                club_name: config.chat.club_name.clone(),
                assistant_name: config.chat.assistant_name.clone(),
                greeting: clubsite_core::chat::session::GREETING.to_string(),
                history_window: config.chat.history_window,
                login_path: config.server.login_path.clone(),
                members_route: MEMBERS_ROUTE,
                members_label: MEMBERS_LINK_LABEL,
            }),
        );
        Ok(Self { env })
    }

    /// Render `name` with a serializable context.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

/// Reformat an RFC 3339 timestamp; anything else is returned unchanged.
fn format_timestamp(value: &str, pattern: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).format(pattern).to_string())
        .unwrap_or_else(|_| value.to_string())
}
