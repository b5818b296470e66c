//! Context builder: a read-only snapshot of site content for the prompt.
//!
//! Four independent reads run concurrently: every member (role-weight
//! order), upcoming events, latest projects and recent news. The snapshot
//! renders to a fixed plain-text layout that the model is told to treat as
//! its only source of facts.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clubsite_types::config::ChatConfig;
use clubsite_types::content::{Event, MemberWithRole, News, Project};
use clubsite_types::error::{ChatError, ContentError};

use crate::repository::ListOptions;
use crate::repository::event::EventRepository;
use crate::repository::member::MemberRepository;
use crate::repository::news::NewsRepository;
use crate::repository::project::ProjectRepository;
use crate::repository::role::RoleRepository;
use crate::service::content::ContentService;

/// Read access to the content the assistant may talk about.
pub trait ContentSource: Send + Sync {
    /// All members, ordered by role weight ascending.
    fn all_members(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MemberWithRole>, ContentError>> + Send;

    /// Events with `date >= now`, soonest first.
    fn events_from(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Event>, ContentError>> + Send;

    /// Most recently created projects first.
    fn latest_projects(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Project>, ContentError>> + Send;

    /// Most recently dated news first.
    fn recent_news(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<News>, ContentError>> + Send;
}

impl<R, M, E, P, N> ContentSource for ContentService<R, M, E, P, N>
where
    R: RoleRepository,
    M: MemberRepository,
    E: EventRepository,
    P: ProjectRepository,
    N: NewsRepository,
{
    async fn all_members(&self) -> Result<Vec<MemberWithRole>, ContentError> {
        self.list_members().await
    }

    async fn events_from(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Event>, ContentError> {
        self.upcoming_events(now, Some(limit)).await
    }

    async fn latest_projects(&self, limit: i64) -> Result<Vec<Project>, ContentError> {
        self.list_projects(ListOptions::latest(limit)).await
    }

    async fn recent_news(&self, limit: i64) -> Result<Vec<News>, ContentError> {
        self.list_news(ListOptions::latest(limit)).await
    }
}

impl<T: ContentSource> ContentSource for Arc<T> {
    fn all_members(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MemberWithRole>, ContentError>> + Send {
        self.as_ref().all_members()
    }

    fn events_from(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Event>, ContentError>> + Send {
        self.as_ref().events_from(now, limit)
    }

    fn latest_projects(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Project>, ContentError>> + Send {
        self.as_ref().latest_projects(limit)
    }

    fn recent_news(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<News>, ContentError>> + Send {
        self.as_ref().recent_news(limit)
    }
}

/// Size bounds for each snapshot section.
#[derive(Debug, Clone, Copy)]
pub struct ContextLimits {
    pub upcoming_events: i64,
    pub projects: i64,
    pub news: i64,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self::from(&ChatConfig::default())
    }
}

impl From<&ChatConfig> for ContextLimits {
    fn from(config: &ChatConfig) -> Self {
        Self {
            upcoming_events: config.max_upcoming_events,
            projects: config.max_projects,
            news: config.max_news,
        }
    }
}

/// Content as of `taken_at`.
#[derive(Debug, Clone)]
pub struct ContextSnapshot {
    pub taken_at: DateTime<Utc>,
    pub members: Vec<MemberWithRole>,
    pub events: Vec<Event>,
    pub projects: Vec<Project>,
    pub news: Vec<News>,
}

/// Calendar date as displayed to Turkish readers (`18.10.2026`).
pub fn display_date(at: DateTime<Utc>) -> String {
    at.format("%d.%m.%Y").to_string()
}

impl ContextSnapshot {
    /// Render the snapshot as the text block embedded in the system message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Current Date: {}", display_date(self.taken_at));

        out.push_str("\nTeam Members:\n");
        for entry in &self.members {
            let m = &entry.member;
            let _ = writeln!(
                out,
                "- {} ({}): {}. Socials: {}, {}, {}",
                m.name,
                entry.role.name,
                m.bio.as_deref().unwrap_or("No bio"),
                m.twitter.as_deref().unwrap_or(""),
                m.instagram.as_deref().unwrap_or(""),
                m.linkedin.as_deref().unwrap_or(""),
            );
        }

        out.push_str("\nUpcoming Events:\n");
        for event in &self.events {
            let _ = writeln!(
                out,
                "- {} ({}): {}. Link: {}",
                event.title,
                display_date(event.date),
                event.description,
                event.link.as_deref().unwrap_or("Yok"),
            );
        }

        out.push_str("\nLatest Projects:\n");
        for project in &self.projects {
            let _ = writeln!(
                out,
                "- {} (ID: {}): {}",
                project.title, project.id, project.description
            );
        }

        out.push_str("\nRecent News:\n");
        for news in &self.news {
            let _ = writeln!(
                out,
                "- {} (ID: {}) ({}): {}",
                news.title,
                news.id,
                display_date(news.date),
                news.description
            );
        }

        out
    }
}

/// Builds a [`ContextSnapshot`] for every chat turn.
pub struct ContextBuilder<S: ContentSource> {
    source: S,
    limits: ContextLimits,
}

impl<S: ContentSource> ContextBuilder<S> {
    pub fn new(source: S, limits: ContextLimits) -> Self {
        Self { source, limits }
    }

    /// Snapshot content as of now.
    pub async fn build(&self) -> Result<ContextSnapshot, ChatError> {
        self.build_at(Utc::now()).await
    }

    /// Snapshot content as of `now`.
    ///
    /// Any failed read fails the whole snapshot. Section bounds and ordering
    /// are re-applied here so the snapshot holds them regardless of source.
    pub async fn build_at(&self, now: DateTime<Utc>) -> Result<ContextSnapshot, ChatError> {
        let (members, mut events, mut projects, mut news) = tokio::try_join!(
            self.source.all_members(),
            self.source.events_from(now, self.limits.upcoming_events),
            self.source.latest_projects(self.limits.projects),
            self.source.recent_news(self.limits.news),
        )
        .map_err(|e| ChatError::Store(e.to_string()))?;

        events.retain(|e| e.is_upcoming(now));
        events.sort_by_key(|e| e.date);
        events.truncate(bound(self.limits.upcoming_events));

        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        projects.truncate(bound(self.limits.projects));

        news.sort_by(|a, b| b.date.cmp(&a.date));
        news.truncate(bound(self.limits.news));

        tracing::debug!(
            members = members.len(),
            events = events.len(),
            projects = projects.len(),
            news = news.len(),
            "context snapshot built"
        );

        Ok(ContextSnapshot {
            taken_at: now,
            members,
            events,
            projects,
            news,
        })
    }
}

fn bound(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, Utc};
    use clubsite_types::content::{
        Event, ImagePosition, Member, MemberWithRole, News, Project, Role, new_id,
    };

    pub fn member(name: &str, role: &str, weight: i64, bio: Option<&str>) -> MemberWithRole {
        let now = Utc::now();
        let role = Role {
            id: new_id(),
            name: role.to_string(),
            weight,
        };
        MemberWithRole {
            member: Member {
                id: new_id(),
                name: name.to_string(),
                role_id: role.id,
                image: None,
                image_position: ImagePosition::Center,
                bio: bio.map(str::to_string),
                instagram: None,
                linkedin: None,
                twitter: None,
                created_at: now,
                updated_at: now,
            },
            role,
        }
    }

    pub fn event(title: &str, date: DateTime<Utc>, link: Option<&str>) -> Event {
        Event {
            id: new_id(),
            title: title.to_string(),
            description: format!("{title} açıklaması"),
            image: None,
            date,
            link: link.map(str::to_string),
            created_at: date,
            updated_at: date,
        }
    }

    pub fn project(title: &str, age_days: i64) -> Project {
        let created = Utc::now() - Duration::days(age_days);
        Project {
            id: new_id(),
            title: title.to_string(),
            description: format!("{title} projesi"),
            content: String::new(),
            thumbnail: None,
            created_at: created,
            updated_at: created,
        }
    }

    pub fn news(title: &str, age_days: i64) -> News {
        let date = Utc::now() - Duration::days(age_days);
        News {
            id: new_id(),
            title: title.to_string(),
            description: format!("{title} haberi"),
            content: String::new(),
            thumbnail: None,
            date,
            created_at: date,
            updated_at: date,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use chrono::{Duration, TimeZone};

    use super::fixtures::*;
    use super::*;

    /// Returns canned content regardless of limits, unordered.
    #[derive(Default)]
    struct StaticSource {
        members: Vec<MemberWithRole>,
        events: Vec<Event>,
        projects: Vec<Project>,
        news: Vec<News>,
        fail: bool,
    }

    impl ContentSource for StaticSource {
        fn all_members(&self) -> impl Future<Output = Result<Vec<MemberWithRole>, ContentError>> + Send {
            let result = if self.fail {
                Err(ContentError::StorageError("database connection error".to_string()))
            } else {
                Ok(self.members.clone())
            };
            async move { result }
        }

        fn events_from(
            &self,
            _now: DateTime<Utc>,
            _limit: i64,
        ) -> impl Future<Output = Result<Vec<Event>, ContentError>> + Send {
            let events = self.events.clone();
            async move { Ok(events) }
        }

        fn latest_projects(
            &self,
            _limit: i64,
        ) -> impl Future<Output = Result<Vec<Project>, ContentError>> + Send {
            let projects = self.projects.clone();
            async move { Ok(projects) }
        }

        fn recent_news(&self, _limit: i64) -> impl Future<Output = Result<Vec<News>, ContentError>> + Send {
            let news = self.news.clone();
            async move { Ok(news) }
        }
    }

    #[tokio::test]
    async fn test_snapshot_enforces_bounds_and_ordering() {
        let now = Utc::now();
        let source = StaticSource {
            events: (0..8)
                .rev()
                .map(|d| event(&format!("E{d}"), now + Duration::days(d - 1), None))
                .collect(),
            projects: (0..7).map(|d| project(&format!("P{d}"), 10 - d)).collect(),
            news: (0..4).map(|d| news(&format!("N{d}"), d)).collect(),
            ..Default::default()
        };
        let builder = ContextBuilder::new(source, ContextLimits::default());
        let snapshot = builder.build_at(now).await.unwrap();

        assert_eq!(snapshot.events.len(), 5);
        assert!(snapshot.events.iter().all(|e| e.date >= now));
        assert!(snapshot.events.windows(2).all(|w| w[0].date <= w[1].date));

        assert_eq!(snapshot.projects.len(), 5);
        assert_eq!(snapshot.projects[0].title, "P6");
        assert!(
            snapshot
                .projects
                .windows(2)
                .all(|w| w[0].created_at >= w[1].created_at)
        );

        assert_eq!(snapshot.news.len(), 3);
        assert_eq!(snapshot.news[0].title, "N0");
    }

    #[tokio::test]
    async fn test_store_failure_fails_snapshot() {
        let builder = ContextBuilder::new(
            StaticSource {
                fail: true,
                ..Default::default()
            },
            ContextLimits::default(),
        );
        let err = builder.build().await.unwrap_err();
        assert!(matches!(err, ChatError::Store(_)));
    }

    #[test]
    fn test_render_layout() {
        let taken_at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let mut lead = member("Ayşe", "Başkan", 0, Some("Takım lideri"));
        lead.member.twitter = Some("https://x.com/ayse".to_string());
        let quiet = member("Can", "Üye", 5, None);
        let kickoff = event(
            "Tanışma",
            Utc.with_ymd_and_hms(2026, 11, 2, 18, 0, 0).unwrap(),
            Some("https://forms.example/tanisma"),
        );
        let mut workshop = kickoff.clone();
        workshop.title = "Atölye".to_string();
        workshop.link = None;
        let rocket = project("Roket", 1);
        let mut final_news = news("Final", 0);
        final_news.date = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();

        let snapshot = ContextSnapshot {
            taken_at,
            members: vec![lead, quiet],
            events: vec![kickoff, workshop],
            projects: vec![rocket.clone()],
            news: vec![final_news.clone()],
        };
        let text = snapshot.render();

        assert!(text.starts_with("Current Date: 18.10.2026\n"));
        assert!(text.contains(
            "- Ayşe (Başkan): Takım lideri. Socials: https://x.com/ayse, , \n"
        ));
        assert!(text.contains("- Can (Üye): No bio. Socials: , , \n"));
        assert!(text.contains(
            "- Tanışma (02.11.2026): Tanışma açıklaması. Link: https://forms.example/tanisma\n"
        ));
        assert!(text.contains("- Atölye (02.11.2026): Tanışma açıklaması. Link: Yok\n"));
        assert!(text.contains(&format!("- Roket (ID: {}): Roket projesi\n", rocket.id)));
        assert!(text.contains(&format!(
            "- Final (ID: {}) (01.09.2026): Final haberi\n",
            final_news.id
        )));

        let order: Vec<usize> = ["Team Members:", "Upcoming Events:", "Latest Projects:", "Recent News:"]
            .iter()
            .map(|h| text.find(h).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_empty_sections_keep_headers() {
        let snapshot = ContextSnapshot {
            taken_at: Utc::now(),
            members: vec![],
            events: vec![],
            projects: vec![],
            news: vec![],
        };
        let text = snapshot.render();
        assert!(text.contains("Upcoming Events:\n\nLatest Projects:"));
    }
}
