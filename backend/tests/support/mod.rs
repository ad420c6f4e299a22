//! In-memory adapters and app assembly for HTTP integration tests.
//!
//! The store implements every driven port over plain vectors so scenarios can
//! drive the full stack (session, handlers, services, audit) without
//! PostgreSQL.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use dispatch_board::Trace;
use dispatch_board::domain::ports::{
    AuditLogRepository, AuditLogRepositoryError, DailyInfoRepository, DailyInfoRepositoryError,
    DutyRosterRepository, DutyRosterRepositoryError, FixtureIdentityProvider, NewDailyInfo,
    NewDutyRosterEntry, UserProfileUpsert, UserRepository, UserRepositoryError,
};
use dispatch_board::domain::{
    AllowList, AuditEntry, DailyInfo, DailyInfoCriteria, DailyInfoService, DutyRosterCriteria,
    DutyRosterEntry, DutyRosterService, Role, SignInService, User, UserId, UserSummary,
};
use dispatch_board::inbound::http::configure_api;
use dispatch_board::inbound::http::error::{json_error_handler, query_error_handler};
use dispatch_board::inbound::http::state::HttpState;

/// Address on the allow-list of every test app.
pub const OPERATOR_EMAIL: &str = "kari@example.com";

/// Wednesday 2024-03-06 12:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0)
        .single()
        .expect("valid fixture time")
}

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("store lock poisoned")
}

/// Shared in-memory persistence for one test app.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    daily_info: Mutex<Vec<DailyInfo>>,
    roster: Mutex<Vec<DutyRosterEntry>>,
    audit: Mutex<Vec<AuditEntry>>,
    audit_unavailable: AtomicBool,
}

impl InMemoryStore {
    /// Make every subsequent audit append fail.
    pub fn fail_audit_writes(&self) {
        self.audit_unavailable.store(true, Ordering::SeqCst);
    }

    /// Audit entries appended so far, oldest first.
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        lock(&self.audit).clone()
    }

    pub fn daily_info_count(&self) -> usize {
        lock(&self.daily_info).len()
    }

    fn creator(&self, id: &UserId) -> Result<UserSummary, String> {
        lock(&self.users)
            .iter()
            .find(|user| user.id == *id)
            .map(User::summary)
            .ok_or_else(|| format!("creator {id} missing"))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn upsert_by_email(
        &self,
        profile: &UserProfileUpsert,
    ) -> Result<User, UserRepositoryError> {
        let mut users = lock(&self.users);
        if let Some(existing) = users.iter_mut().find(|user| user.email == profile.email) {
            if profile.name.is_some() {
                existing.name.clone_from(&profile.name);
            }
            if profile.image.is_some() {
                existing.image.clone_from(&profile.image);
            }
            return Ok(existing.clone());
        }
        let user = User {
            id: profile.new_id,
            email: profile.email.clone(),
            name: profile.name.clone(),
            image: profile.image.clone(),
            role: Role::Operator,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users).iter().find(|user| user.id == *id).cloned())
    }
}

#[async_trait]
impl DailyInfoRepository for InMemoryStore {
    async fn insert(&self, record: &NewDailyInfo) -> Result<DailyInfo, DailyInfoRepositoryError> {
        let created_by = self
            .creator(&record.created_by)
            .map_err(DailyInfoRepositoryError::query)?;
        let draft = record.draft.clone();
        let stored = DailyInfo {
            id: record.id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            valid_from: draft.valid_from,
            valid_until: draft.valid_until,
            created_by,
            created_at: record.created_at,
            updated_at: record.created_at,
        };
        lock(&self.daily_info).push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<DailyInfo>, DailyInfoRepositoryError> {
        Ok(lock(&self.daily_info)
            .iter()
            .find(|record| record.id == *id)
            .cloned())
    }

    async fn list(
        &self,
        criteria: &DailyInfoCriteria,
    ) -> Result<Vec<DailyInfo>, DailyInfoRepositoryError> {
        Ok(lock(&self.daily_info)
            .iter()
            .filter(|record| criteria.matches(record))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        record: &DailyInfo,
    ) -> Result<Option<DailyInfo>, DailyInfoRepositoryError> {
        let mut records = lock(&self.daily_info);
        Ok(records
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .map(|existing| {
                *existing = record.clone();
                existing.clone()
            }))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DailyInfoRepositoryError> {
        let mut records = lock(&self.daily_info);
        let before = records.len();
        records.retain(|record| record.id != *id);
        Ok(records.len() < before)
    }
}

#[async_trait]
impl DutyRosterRepository for InMemoryStore {
    async fn insert(
        &self,
        entry: &NewDutyRosterEntry,
    ) -> Result<DutyRosterEntry, DutyRosterRepositoryError> {
        let created_by = self
            .creator(&entry.created_by)
            .map_err(DutyRosterRepositoryError::query)?;
        let draft = entry.draft.clone();
        let stored = DutyRosterEntry {
            id: entry.id,
            date: draft.date,
            operator_name: draft.operator_name,
            shift: draft.shift,
            notes: draft.notes,
            created_by,
            created_at: entry.created_at,
            updated_at: entry.created_at,
        };
        lock(&self.roster).push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<DutyRosterEntry>, DutyRosterRepositoryError> {
        Ok(lock(&self.roster).iter().find(|entry| entry.id == *id).cloned())
    }

    async fn list(
        &self,
        criteria: &DutyRosterCriteria,
    ) -> Result<Vec<DutyRosterEntry>, DutyRosterRepositoryError> {
        Ok(lock(&self.roster)
            .iter()
            .filter(|entry| criteria.matches(entry))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        entry: &DutyRosterEntry,
    ) -> Result<Option<DutyRosterEntry>, DutyRosterRepositoryError> {
        let mut entries = lock(&self.roster);
        Ok(entries
            .iter_mut()
            .find(|existing| existing.id == entry.id)
            .map(|existing| {
                *existing = entry.clone();
                existing.clone()
            }))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DutyRosterRepositoryError> {
        let mut entries = lock(&self.roster);
        let before = entries.len();
        entries.retain(|entry| entry.id != *id);
        Ok(entries.len() < before)
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryStore {
    async fn append(&self, entry: &AuditEntry) -> Result<(), AuditLogRepositoryError> {
        if self.audit_unavailable.load(Ordering::SeqCst) {
            return Err(AuditLogRepositoryError::connection("audit store offline"));
        }
        lock(&self.audit).push(entry.clone());
        Ok(())
    }
}

/// Wire real domain services over `store`, signing in `fixture:<email>`
/// tokens for [`OPERATOR_EMAIL`].
pub fn http_state(store: &Arc<InMemoryStore>) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));
    let sign_in = Arc::new(SignInService::new(
        Arc::clone(store),
        Arc::new(FixtureIdentityProvider),
        AllowList::from_csv(OPERATOR_EMAIL),
    ));
    let daily_info = Arc::new(DailyInfoService::new(
        Arc::clone(store),
        Arc::clone(store),
        Arc::clone(&clock),
    ));
    let duty_roster = Arc::new(DutyRosterService::new(
        Arc::clone(store),
        Arc::clone(store),
        clock,
    ));
    web::Data::new(HttpState {
        sign_in: sign_in.clone(),
        profile: sign_in,
        daily_info: daily_info.clone(),
        daily_info_query: daily_info,
        duty_roster: duty_roster.clone(),
        duty_roster_query: duty_roster,
    })
}

/// App assembled the way the server binary assembles it, minus TLS-only
/// cookie flags.
pub fn dashboard_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(web::scope("/api/v1").wrap(session).configure(configure_api))
}
