//! Content management service.
//!
//! Validates and normalises admin input for roles, members, events,
//! projects and news before handing it to the repositories. Optional text
//! fields are trimmed and blank values are stored as `None`.

use chrono::{DateTime, Utc};
use clubsite_types::content::{
    CreateEventRequest, CreateMemberRequest, CreateNewsRequest, CreateProjectRequest,
    CreateRoleRequest, Event, Member, MemberWithRole, News, Project, Role, UpdateEventRequest,
    UpdateMemberRequest, UpdateNewsRequest, UpdateProjectRequest, new_id,
};
use clubsite_types::error::{ContentError, RepositoryError};
use clubsite_types::non_blank;
use serde::Serialize;
use uuid::Uuid;

use crate::repository::event::{EventFilter, EventRepository};
use crate::repository::member::MemberRepository;
use crate::repository::news::NewsRepository;
use crate::repository::project::ProjectRepository;
use crate::repository::role::RoleRepository;
use crate::repository::{ListOptions, SortOrder};

/// Members sharing one role, as shown on the members page.
#[derive(Debug, Clone, Serialize)]
pub struct RoleGroup {
    pub role: Role,
    pub members: Vec<MemberWithRole>,
}

/// Service over every editable content type.
///
/// Generic over the repository traits so clubsite-core never depends on
/// clubsite-infra.
pub struct ContentService<R, M, E, P, N>
where
    R: RoleRepository,
    M: MemberRepository,
    E: EventRepository,
    P: ProjectRepository,
    N: NewsRepository,
{
    roles: R,
    members: M,
    events: E,
    projects: P,
    news: N,
}

fn required(field: &str, value: String) -> Result<String, ContentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContentError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Map a repository error, keeping `NotFound` attributable to `entity`.
fn repo_err(entity: &'static str) -> impl Fn(RepositoryError) -> ContentError {
    move |e| match e {
        RepositoryError::NotFound => ContentError::NotFound(entity),
        other => other.into(),
    }
}

impl<R, M, E, P, N> ContentService<R, M, E, P, N>
where
    R: RoleRepository,
    M: MemberRepository,
    E: EventRepository,
    P: ProjectRepository,
    N: NewsRepository,
{
    pub fn new(roles: R, members: M, events: E, projects: P, news: N) -> Self {
        Self {
            roles,
            members,
            events,
            projects,
            news,
        }
    }

    // --- Roles ---

    pub async fn list_roles(&self, order: SortOrder) -> Result<Vec<Role>, ContentError> {
        Ok(self.roles.list(order).await?)
    }

    pub async fn create_role(&self, request: CreateRoleRequest) -> Result<Role, ContentError> {
        let role = Role {
            id: new_id(),
            name: required("name", request.name)?,
            weight: request.weight,
        };
        let created = self.roles.create(&role).await?;
        tracing::info!(role_id = %created.id, name = %created.name, "role created");
        Ok(created)
    }

    pub async fn delete_role(&self, id: &Uuid) -> Result<(), ContentError> {
        self.roles.delete(id).await.map_err(repo_err("role"))
    }

    // --- Members ---

    pub async fn list_members(&self) -> Result<Vec<MemberWithRole>, ContentError> {
        Ok(self.members.list_with_roles().await?)
    }

    /// Members grouped under their role, groups in role-weight order.
    pub async fn members_by_role(&self) -> Result<Vec<RoleGroup>, ContentError> {
        let members = self.members.list_with_roles().await?;
        let mut groups: Vec<RoleGroup> = Vec::new();
        for member in members {
            match groups.iter_mut().find(|g| g.role.id == member.role.id) {
                Some(group) => group.members.push(member),
                None => groups.push(RoleGroup {
                    role: member.role.clone(),
                    members: vec![member],
                }),
            }
        }
        groups.sort_by(|a, b| {
            a.role
                .weight
                .cmp(&b.role.weight)
                .then_with(|| a.role.name.cmp(&b.role.name))
        });
        Ok(groups)
    }

    pub async fn get_member(&self, id: &Uuid) -> Result<MemberWithRole, ContentError> {
        self.members
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("member"))
    }

    pub async fn create_member(
        &self,
        request: CreateMemberRequest,
    ) -> Result<Member, ContentError> {
        self.ensure_role(&request.role_id).await?;
        let now = Utc::now();
        let member = Member {
            id: new_id(),
            name: required("name", request.name)?,
            role_id: request.role_id,
            image: non_blank(request.image),
            image_position: request.image_position.unwrap_or_default(),
            bio: non_blank(request.bio),
            instagram: non_blank(request.instagram),
            linkedin: non_blank(request.linkedin),
            twitter: non_blank(request.twitter),
            created_at: now,
            updated_at: now,
        };
        let created = self.members.create(&member).await?;
        tracing::info!(member_id = %created.id, "member created");
        Ok(created)
    }

    pub async fn update_member(
        &self,
        id: &Uuid,
        request: UpdateMemberRequest,
    ) -> Result<Member, ContentError> {
        let mut member = self.get_member(id).await?.member;

        if let Some(name) = request.name {
            member.name = required("name", name)?;
        }
        if let Some(role_id) = request.role_id {
            self.ensure_role(&role_id).await?;
            member.role_id = role_id;
        }
        if let Some(position) = request.image_position {
            member.image_position = position;
        }
        if request.image.is_some() {
            member.image = non_blank(request.image);
        }
        if request.bio.is_some() {
            member.bio = non_blank(request.bio);
        }
        if request.instagram.is_some() {
            member.instagram = non_blank(request.instagram);
        }
        if request.linkedin.is_some() {
            member.linkedin = non_blank(request.linkedin);
        }
        if request.twitter.is_some() {
            member.twitter = non_blank(request.twitter);
        }
        member.updated_at = Utc::now();

        self.members.update(&member).await.map_err(repo_err("member"))
    }

    pub async fn delete_member(&self, id: &Uuid) -> Result<(), ContentError> {
        self.members.delete(id).await.map_err(repo_err("member"))
    }

    async fn ensure_role(&self, role_id: &Uuid) -> Result<(), ContentError> {
        match self.roles.get_by_id(role_id).await? {
            Some(_) => Ok(()),
            None => Err(ContentError::Validation(format!(
                "role {role_id} does not exist"
            ))),
        }
    }

    // --- Events ---

    pub async fn list_events(&self, filter: EventFilter) -> Result<Vec<Event>, ContentError> {
        Ok(self.events.list(filter).await?)
    }

    /// Events on or after `now`, soonest first.
    pub async fn upcoming_events(
        &self,
        now: DateTime<Utc>,
        limit: Option<i64>,
    ) -> Result<Vec<Event>, ContentError> {
        self.list_events(EventFilter::upcoming(now, limit)).await
    }

    /// Events before `now`, most recent first.
    pub async fn past_events(
        &self,
        now: DateTime<Utc>,
        limit: Option<i64>,
    ) -> Result<Vec<Event>, ContentError> {
        self.list_events(EventFilter::past(now, limit)).await
    }

    pub async fn get_event(&self, id: &Uuid) -> Result<Event, ContentError> {
        self.events
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("event"))
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event, ContentError> {
        let now = Utc::now();
        let event = Event {
            id: new_id(),
            title: required("title", request.title)?,
            description: request.description.trim().to_string(),
            image: non_blank(request.image),
            date: request.date,
            link: non_blank(request.link),
            created_at: now,
            updated_at: now,
        };
        let created = self.events.create(&event).await?;
        tracing::info!(event_id = %created.id, date = %created.date, "event created");
        Ok(created)
    }

    pub async fn update_event(
        &self,
        id: &Uuid,
        request: UpdateEventRequest,
    ) -> Result<Event, ContentError> {
        let mut event = self.get_event(id).await?;
        if let Some(title) = request.title {
            event.title = required("title", title)?;
        }
        if let Some(description) = request.description {
            event.description = description.trim().to_string();
        }
        if let Some(date) = request.date {
            event.date = date;
        }
        if request.image.is_some() {
            event.image = non_blank(request.image);
        }
        if request.link.is_some() {
            event.link = non_blank(request.link);
        }
        event.updated_at = Utc::now();
        self.events.update(&event).await.map_err(repo_err("event"))
    }

    pub async fn delete_event(&self, id: &Uuid) -> Result<(), ContentError> {
        self.events.delete(id).await.map_err(repo_err("event"))
    }

    // --- Projects ---

    pub async fn list_projects(&self, options: ListOptions) -> Result<Vec<Project>, ContentError> {
        Ok(self.projects.list(options).await?)
    }

    pub async fn get_project(&self, id: &Uuid) -> Result<Project, ContentError> {
        self.projects
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("project"))
    }

    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<Project, ContentError> {
        let now = Utc::now();
        let project = Project {
            id: new_id(),
            title: required("title", request.title)?,
            description: required("description", request.description)?,
            content: request.content,
            thumbnail: non_blank(request.thumbnail),
            created_at: now,
            updated_at: now,
        };
        let created = self.projects.create(&project).await?;
        tracing::info!(project_id = %created.id, "project created");
        Ok(created)
    }

    pub async fn update_project(
        &self,
        id: &Uuid,
        request: UpdateProjectRequest,
    ) -> Result<Project, ContentError> {
        let mut project = self.get_project(id).await?;
        if let Some(title) = request.title {
            project.title = required("title", title)?;
        }
        if let Some(description) = request.description {
            project.description = required("description", description)?;
        }
        if let Some(content) = request.content {
            project.content = content;
        }
        if request.thumbnail.is_some() {
            project.thumbnail = non_blank(request.thumbnail);
        }
        project.updated_at = Utc::now();
        self.projects
            .update(&project)
            .await
            .map_err(repo_err("project"))
    }

    pub async fn delete_project(&self, id: &Uuid) -> Result<(), ContentError> {
        self.projects.delete(id).await.map_err(repo_err("project"))
    }

    // --- News ---

    pub async fn list_news(&self, options: ListOptions) -> Result<Vec<News>, ContentError> {
        Ok(self.news.list(options).await?)
    }

    pub async fn get_news(&self, id: &Uuid) -> Result<News, ContentError> {
        self.news
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("news"))
    }

    pub async fn create_news(&self, request: CreateNewsRequest) -> Result<News, ContentError> {
        let now = Utc::now();
        let news = News {
            id: new_id(),
            title: required("title", request.title)?,
            description: required("description", request.description)?,
            content: request.content,
            thumbnail: non_blank(request.thumbnail),
            date: request.date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };
        let created = self.news.create(&news).await?;
        tracing::info!(news_id = %created.id, "news created");
        Ok(created)
    }

    pub async fn update_news(
        &self,
        id: &Uuid,
        request: UpdateNewsRequest,
    ) -> Result<News, ContentError> {
        let mut news = self.get_news(id).await?;
        if let Some(title) = request.title {
            news.title = required("title", title)?;
        }
        if let Some(description) = request.description {
            news.description = required("description", description)?;
        }
        if let Some(content) = request.content {
            news.content = content;
        }
        if let Some(date) = request.date {
            news.date = date;
        }
        if request.thumbnail.is_some() {
            news.thumbnail = non_blank(request.thumbnail);
        }
        news.updated_at = Utc::now();
        self.news.update(&news).await.map_err(repo_err("news"))
    }

    pub async fn delete_news(&self, id: &Uuid) -> Result<(), ContentError> {
        self.news.delete(id).await.map_err(repo_err("news"))
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory repositories shared by the service and chat tests.

    use std::future::Future;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    pub struct MemoryStore {
        pub roles: Arc<Mutex<Vec<Role>>>,
        pub members: Arc<Mutex<Vec<Member>>>,
        pub events: Arc<Mutex<Vec<Event>>>,
        pub projects: Arc<Mutex<Vec<Project>>>,
        pub news: Arc<Mutex<Vec<News>>>,
    }

    fn limited<T>(mut items: Vec<T>, limit: Option<i64>) -> Vec<T> {
        if let Some(limit) = limit {
            items.truncate(limit.max(0) as usize);
        }
        items
    }

    impl RoleRepository for MemoryStore {
        fn create(&self, role: &Role) -> impl Future<Output = Result<Role, RepositoryError>> + Send {
            self.roles.lock().unwrap().push(role.clone());
            let role = role.clone();
            async move { Ok(role) }
        }

        fn get_by_id(
            &self,
            id: &Uuid,
        ) -> impl Future<Output = Result<Option<Role>, RepositoryError>> + Send {
            let found = self.roles.lock().unwrap().iter().find(|r| r.id == *id).cloned();
            async move { Ok(found) }
        }

        fn list(
            &self,
            order: SortOrder,
        ) -> impl Future<Output = Result<Vec<Role>, RepositoryError>> + Send {
            let mut roles = self.roles.lock().unwrap().clone();
            roles.sort_by_key(|r| r.weight);
            if order == SortOrder::Desc {
                roles.reverse();
            }
            async move { Ok(roles) }
        }

        fn delete(&self, id: &Uuid) -> impl Future<Output = Result<(), RepositoryError>> + Send {
            let in_use = self.members.lock().unwrap().iter().any(|m| m.role_id == *id);
            let result = if in_use {
                Err(RepositoryError::Conflict("role has members".to_string()))
            } else {
                let mut roles = self.roles.lock().unwrap();
                let before = roles.len();
                roles.retain(|r| r.id != *id);
                if roles.len() == before {
                    Err(RepositoryError::NotFound)
                } else {
                    Ok(())
                }
            };
            async move { result }
        }
    }

    impl MemoryStore {
        fn join(&self, member: &Member) -> Option<MemberWithRole> {
            let roles = self.roles.lock().unwrap();
            roles.iter().find(|r| r.id == member.role_id).map(|role| MemberWithRole {
                member: member.clone(),
                role: role.clone(),
            })
        }
    }

    impl MemberRepository for MemoryStore {
        fn create(
            &self,
            member: &Member,
        ) -> impl Future<Output = Result<Member, RepositoryError>> + Send {
            self.members.lock().unwrap().push(member.clone());
            let member = member.clone();
            async move { Ok(member) }
        }

        fn get_by_id(
            &self,
            id: &Uuid,
        ) -> impl Future<Output = Result<Option<MemberWithRole>, RepositoryError>> + Send {
            let member = self.members.lock().unwrap().iter().find(|m| m.id == *id).cloned();
            let found = member.and_then(|m| self.join(&m));
            async move { Ok(found) }
        }

        fn list_with_roles(
            &self,
        ) -> impl Future<Output = Result<Vec<MemberWithRole>, RepositoryError>> + Send {
            let members = self.members.lock().unwrap().clone();
            let mut joined: Vec<MemberWithRole> = members.iter().filter_map(|m| self.join(m)).collect();
            joined.sort_by(|a, b| {
                a.role
                    .weight
                    .cmp(&b.role.weight)
                    .then_with(|| a.member.name.cmp(&b.member.name))
            });
            async move { Ok(joined) }
        }

        fn update(
            &self,
            member: &Member,
        ) -> impl Future<Output = Result<Member, RepositoryError>> + Send {
            let mut members = self.members.lock().unwrap();
            let result = match members.iter_mut().find(|m| m.id == member.id) {
                Some(slot) => {
                    *slot = member.clone();
                    Ok(member.clone())
                }
                None => Err(RepositoryError::NotFound),
            };
            async move { result }
        }

        fn delete(&self, id: &Uuid) -> impl Future<Output = Result<(), RepositoryError>> + Send {
            let mut members = self.members.lock().unwrap();
            let before = members.len();
            members.retain(|m| m.id != *id);
            let result = if members.len() == before {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            };
            async move { result }
        }
    }

    impl EventRepository for MemoryStore {
        fn create(
            &self,
            event: &Event,
        ) -> impl Future<Output = Result<Event, RepositoryError>> + Send {
            self.events.lock().unwrap().push(event.clone());
            let event = event.clone();
            async move { Ok(event) }
        }

        fn get_by_id(
            &self,
            id: &Uuid,
        ) -> impl Future<Output = Result<Option<Event>, RepositoryError>> + Send {
            let found = self.events.lock().unwrap().iter().find(|e| e.id == *id).cloned();
            async move { Ok(found) }
        }

        fn list(
            &self,
            filter: EventFilter,
        ) -> impl Future<Output = Result<Vec<Event>, RepositoryError>> + Send {
            use crate::repository::event::EventWindow;

            let mut events: Vec<Event> = self
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| match filter.window {
                    Some(EventWindow::Upcoming { at }) => e.date >= at,
                    Some(EventWindow::Past { at }) => e.date < at,
                    None => true,
                })
                .cloned()
                .collect();
            events.sort_by_key(|e| e.date);
            if filter.sort_order == SortOrder::Desc {
                events.reverse();
            }
            let events = limited(events, filter.limit);
            async move { Ok(events) }
        }

        fn update(
            &self,
            event: &Event,
        ) -> impl Future<Output = Result<Event, RepositoryError>> + Send {
            let mut events = self.events.lock().unwrap();
            let result = match events.iter_mut().find(|e| e.id == event.id) {
                Some(slot) => {
                    *slot = event.clone();
                    Ok(event.clone())
                }
                None => Err(RepositoryError::NotFound),
            };
            async move { result }
        }

        fn delete(&self, id: &Uuid) -> impl Future<Output = Result<(), RepositoryError>> + Send {
            let mut events = self.events.lock().unwrap();
            let before = events.len();
            events.retain(|e| e.id != *id);
            let result = if events.len() == before {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            };
            async move { result }
        }
    }

    impl ProjectRepository for MemoryStore {
        fn create(
            &self,
            project: &Project,
        ) -> impl Future<Output = Result<Project, RepositoryError>> + Send {
            self.projects.lock().unwrap().push(project.clone());
            let project = project.clone();
            async move { Ok(project) }
        }

        fn get_by_id(
            &self,
            id: &Uuid,
        ) -> impl Future<Output = Result<Option<Project>, RepositoryError>> + Send {
            let found = self.projects.lock().unwrap().iter().find(|p| p.id == *id).cloned();
            async move { Ok(found) }
        }

        fn list(
            &self,
            options: ListOptions,
        ) -> impl Future<Output = Result<Vec<Project>, RepositoryError>> + Send {
            let mut projects = self.projects.lock().unwrap().clone();
            projects.sort_by_key(|p| p.created_at);
            if options.sort_order == SortOrder::Desc {
                projects.reverse();
            }
            let projects = limited(projects, options.limit);
            async move { Ok(projects) }
        }

        fn update(
            &self,
            project: &Project,
        ) -> impl Future<Output = Result<Project, RepositoryError>> + Send {
            let mut projects = self.projects.lock().unwrap();
            let result = match projects.iter_mut().find(|p| p.id == project.id) {
                Some(slot) => {
                    *slot = project.clone();
                    Ok(project.clone())
                }
                None => Err(RepositoryError::NotFound),
            };
            async move { result }
        }

        fn delete(&self, id: &Uuid) -> impl Future<Output = Result<(), RepositoryError>> + Send {
            let mut projects = self.projects.lock().unwrap();
            let before = projects.len();
            projects.retain(|p| p.id != *id);
            let result = if projects.len() == before {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            };
            async move { result }
        }
    }

    impl NewsRepository for MemoryStore {
        fn create(&self, news: &News) -> impl Future<Output = Result<News, RepositoryError>> + Send {
            self.news.lock().unwrap().push(news.clone());
            let news = news.clone();
            async move { Ok(news) }
        }

        fn get_by_id(
            &self,
            id: &Uuid,
        ) -> impl Future<Output = Result<Option<News>, RepositoryError>> + Send {
            let found = self.news.lock().unwrap().iter().find(|n| n.id == *id).cloned();
            async move { Ok(found) }
        }

        fn list(
            &self,
            options: ListOptions,
        ) -> impl Future<Output = Result<Vec<News>, RepositoryError>> + Send {
            let mut news = self.news.lock().unwrap().clone();
            news.sort_by_key(|n| n.date);
            if options.sort_order == SortOrder::Desc {
                news.reverse();
            }
            let news = limited(news, options.limit);
            async move { Ok(news) }
        }

        fn update(&self, news: &News) -> impl Future<Output = Result<News, RepositoryError>> + Send {
            let mut all = self.news.lock().unwrap();
            let result = match all.iter_mut().find(|n| n.id == news.id) {
                Some(slot) => {
                    *slot = news.clone();
                    Ok(news.clone())
                }
                None => Err(RepositoryError::NotFound),
            };
            async move { result }
        }

        fn delete(&self, id: &Uuid) -> impl Future<Output = Result<(), RepositoryError>> + Send {
            let mut all = self.news.lock().unwrap();
            let before = all.len();
            all.retain(|n| n.id != *id);
            let result = if all.len() == before {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            };
            async move { result }
        }
    }

    pub type MemoryContentService =
        ContentService<MemoryStore, MemoryStore, MemoryStore, MemoryStore, MemoryStore>;

    pub fn service(store: &MemoryStore) -> MemoryContentService {
        ContentService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        )
    }
}
