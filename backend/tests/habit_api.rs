//! End-to-end handler tests over in-memory repositories.
//!
//! Exercises the full HTTP surface behind cookie sessions: registration and
//! login, habit CRUD, the daily toggle, reflections, statistics, journal,
//! and profile/onboarding. The repositories are in-memory doubles honouring
//! the port contracts, so no database is needed.

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{HttpServiceFactory, Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};

use backend::domain::journal::JournalLog;
use backend::domain::ports::{
    HabitChanges, HabitPersistenceError, HabitRepository, NewHabit, ToggleOutcome, TrackingError,
    TrackingRepository, UserPersistenceError, UserRepository,
};
use backend::domain::stats::HabitHistory;
use backend::domain::streak;
use backend::domain::{EmailAddress, Habit, HabitId, HabitLog, LogId, User, UserId};
use backend::inbound::http::{auth, habits, journal, stats, users, HttpState};

#[derive(Default)]
struct Store {
    users: Vec<User>,
    habits: Vec<Habit>,
    logs: Vec<HabitLog>,
}

type SharedStore = Arc<Mutex<Store>>;

/// In-memory implementation of all three persistence ports.
#[derive(Clone)]
struct MemoryRepository {
    store: SharedStore,
}

impl MemoryRepository {
    fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(UserPersistenceError::DuplicateEmail);
        }
        store.users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let store = self.store.lock().expect("store lock");
        Ok(store.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let store = self.store.lock().expect("store lock");
        Ok(store.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn mark_onboarded(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        match store.users.iter_mut().find(|u| &u.id == id) {
            Some(user) => {
                user.has_completed_onboarding = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl HabitRepository for MemoryRepository {
    async fn list_for_user(
        &self,
        user: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<(Habit, bool)>, HabitPersistenceError> {
        let store = self.store.lock().expect("store lock");
        Ok(store
            .habits
            .iter()
            .filter(|h| &h.user_id == user)
            .map(|h| {
                let completed = store
                    .logs
                    .iter()
                    .any(|log| log.habit_id == h.id && log.day == today);
                (h.clone(), completed)
            })
            .collect())
    }

    async fn create(&self, habit: NewHabit) -> Result<Habit, HabitPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        let stored = Habit {
            id: HabitId::random(),
            user_id: habit.user_id,
            name: habit.name,
            description: habit.description,
            frequency: habit.frequency,
            streak: 0,
        };
        store.habits.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &HabitId,
        user: &UserId,
        changes: HabitChanges,
    ) -> Result<Option<Habit>, HabitPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        let Some(habit) = store
            .habits
            .iter_mut()
            .find(|h| &h.id == id && &h.user_id == user)
        else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            habit.name = name;
        }
        if let Some(description) = changes.description {
            habit.description = Some(description);
        }
        if let Some(frequency) = changes.frequency {
            habit.frequency = frequency;
        }
        Ok(Some(habit.clone()))
    }

    async fn delete(&self, id: &HabitId, user: &UserId) -> Result<bool, HabitPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        let before = store.habits.len();
        store.habits.retain(|h| !(&h.id == id && &h.user_id == user));
        let deleted = store.habits.len() < before;
        if deleted {
            store.logs.retain(|log| &log.habit_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl TrackingRepository for MemoryRepository {
    async fn toggle(
        &self,
        habit: &HabitId,
        user: &UserId,
        today: NaiveDate,
    ) -> Result<ToggleOutcome, TrackingError> {
        // The lock spans check, flip, and recompute; this mirrors the
        // transactional contract of the port.
        let mut store = self.store.lock().expect("store lock");
        if !store
            .habits
            .iter()
            .any(|h| &h.id == habit && &h.user_id == user)
        {
            return Err(TrackingError::HabitNotFound);
        }

        let had_log = store
            .logs
            .iter()
            .any(|log| &log.habit_id == habit && log.day == today);
        let mut prior: Vec<NaiveDate> = store
            .logs
            .iter()
            .filter(|log| &log.habit_id == habit && log.day < today)
            .map(|log| log.day)
            .collect();
        prior.sort_unstable_by(|a, b| b.cmp(a));
        let yesterday = today.pred_opt().unwrap_or(NaiveDate::MIN);
        let run = streak::consecutive_run_ending(yesterday, &prior);

        let outcome = if had_log {
            store
                .logs
                .retain(|log| !(&log.habit_id == habit && log.day == today));
            ToggleOutcome {
                completed: false,
                streak: run,
            }
        } else {
            store.logs.push(HabitLog {
                id: LogId::random(),
                habit_id: *habit,
                day: today,
                reflection: None,
            });
            ToggleOutcome {
                completed: true,
                streak: run + 1,
            }
        };

        if let Some(h) = store.habits.iter_mut().find(|h| &h.id == habit) {
            h.streak = outcome.streak;
        }
        Ok(outcome)
    }

    async fn save_reflection(
        &self,
        habit: &HabitId,
        user: &UserId,
        day: NaiveDate,
        reflection: &str,
    ) -> Result<bool, TrackingError> {
        let mut store = self.store.lock().expect("store lock");
        if !store
            .habits
            .iter()
            .any(|h| &h.id == habit && &h.user_id == user)
        {
            return Err(TrackingError::HabitNotFound);
        }
        match store
            .logs
            .iter_mut()
            .find(|log| &log.habit_id == habit && log.day == day)
        {
            Some(log) => {
                log.reflection = Some(reflection.to_owned());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn habit_histories(&self, user: &UserId) -> Result<Vec<HabitHistory>, TrackingError> {
        let store = self.store.lock().expect("store lock");
        Ok(store
            .habits
            .iter()
            .filter(|h| &h.user_id == user)
            .map(|h| {
                let mut days: Vec<NaiveDate> = store
                    .logs
                    .iter()
                    .filter(|log| log.habit_id == h.id)
                    .map(|log| log.day)
                    .collect();
                days.sort_unstable_by(|a, b| b.cmp(a));
                HabitHistory {
                    habit: h.clone(),
                    days,
                }
            })
            .collect())
    }

    async fn logs_in_range(
        &self,
        user: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<JournalLog>, TrackingError> {
        let store = self.store.lock().expect("store lock");
        let mut logs: Vec<JournalLog> = store
            .logs
            .iter()
            .filter(|log| log.day >= from && log.day <= to)
            .filter_map(|log| {
                store
                    .habits
                    .iter()
                    .find(|h| h.id == log.habit_id && &h.user_id == user)
                    .map(|h| JournalLog {
                        habit_id: h.id,
                        habit_name: h.name.as_ref().to_owned(),
                        day: log.day,
                        reflection: log.reflection.clone(),
                    })
            })
            .collect();
        logs.sort_by_key(|log| log.day);
        Ok(logs)
    }
}

fn memory_state() -> (HttpState, SharedStore) {
    let store: SharedStore = Arc::new(Mutex::new(Store::default()));
    let repo = Arc::new(MemoryRepository::new(store.clone()));
    let state = HttpState::new(repo.clone(), repo.clone(), repo);
    (state, store)
}

/// The `/api` scope exactly as the server mounts it, with a test session key.
fn api(state: HttpState) -> impl HttpServiceFactory {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    web::scope("/api")
        .app_data(web::Data::new(state))
        .wrap(session)
        .service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(habits::list_habits)
        .service(habits::create_habit)
        .service(habits::update_habit)
        .service(habits::delete_habit)
        .service(habits::toggle_habit)
        .service(habits::save_reflection)
        .service(stats::stats)
        .service(journal::journal)
        .service(users::profile)
        .service(users::complete_onboarding)
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn register_user<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "name": "Ada",
                "email": email,
                "password": "correct horse battery"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res)
}

async fn create_habit<S, B>(app: &S, cookie: &Cookie<'static>, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/habits")
            .cookie(cookie.clone())
            .set_json(json!({ "name": name }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    body["id"].as_str().expect("habit id").to_owned()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[actix_web::test]
async fn register_establishes_a_session() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "correct horse battery"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["hasCompletedOnboarding"], false);
    assert!(body["user"].get("passwordHash").is_none());

    let list = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/habits")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(list.status(), StatusCode::OK);
    let habits: Value = test::read_body_json(list).await;
    assert_eq!(habits, json!([]));
}

#[actix_web::test]
async fn duplicate_registration_is_rejected() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;

    register_user(&app, "ada@example.com").await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "name": "Other",
                "email": "ada@example.com",
                "password": "another password"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "User already exists");
}

#[actix_web::test]
async fn login_accepts_valid_and_rejects_invalid_credentials() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    register_user(&app, "ada@example.com").await;

    let ok = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({
                "email": "ada@example.com",
                "password": "correct horse battery"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    let body: Value = test::read_body_json(ok).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["redirectTo"], "/dashboard");

    for payload in [
        json!({ "email": "ada@example.com", "password": "wrong password" }),
        json!({ "email": "nobody@example.com", "password": "correct horse battery" }),
    ] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[actix_web::test]
async fn logout_clears_the_session() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let cookie = register_user(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    // The purged cookie comes back emptied; reusing it must not authenticate.
    let cleared = session_cookie(&res);
    let list = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/habits")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(list.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn endpoints_require_a_session() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;

    for req in [
        test::TestRequest::get().uri("/api/habits"),
        test::TestRequest::post()
            .uri("/api/habits")
            .set_json(json!({ "name": "Read" })),
        test::TestRequest::get().uri("/api/stats"),
        test::TestRequest::get().uri("/api/journal?year=2026&month=8"),
        test::TestRequest::get().uri("/api/user/profile"),
        test::TestRequest::post().uri("/api/user/onboarding"),
    ] {
        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }
}

#[actix_web::test]
async fn habit_crud_round_trip() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let cookie = register_user(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/habits")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "Read", "description": "ten pages" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["name"], "Read");
    assert_eq!(created["description"], "ten pages");
    assert_eq!(created["frequency"], "daily");
    assert_eq!(created["streak"], 0);
    assert_eq!(created["completedToday"], false);
    let id = created["id"].as_str().expect("habit id").to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/habits/{id}"))
            .cookie(cookie.clone())
            .set_json(json!({ "name": "Read more", "frequency": "weekly" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(updated["name"], "Read more");
    assert_eq!(updated["frequency"], "weekly");

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/habits/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/habits/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "Habit not found");
}

#[actix_web::test]
async fn blank_habit_name_is_rejected() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let cookie = register_user(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/habits")
            .cookie(cookie)
            .set_json(json!({ "name": "   " }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn habits_are_scoped_to_their_owner() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let ada = register_user(&app, "ada@example.com").await;
    let eve = register_user(&app, "eve@example.com").await;
    let id = create_habit(&app, &ada, "Read").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/habits/{id}/toggle"))
            .cookie(eve.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/habits/{id}"))
            .cookie(eve)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn toggle_flips_completion_and_recomputes_the_streak() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let cookie = register_user(&app, "ada@example.com").await;
    let id = create_habit(&app, &cookie, "Read").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/habits/{id}/toggle"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "completed": true, "streak": 1 }));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/habits")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let list: Value = test::read_body_json(res).await;
    assert_eq!(list[0]["completedToday"], true);
    assert_eq!(list[0]["streak"], 1);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/habits/{id}/toggle"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "completed": false, "streak": 0 }));
}

#[actix_web::test]
async fn toggle_extends_an_unbroken_run() {
    let (state, store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let cookie = register_user(&app, "ada@example.com").await;
    let id = create_habit(&app, &cookie, "Read").await;
    let habit_id = HabitId::new(&id).expect("valid habit id");

    {
        let mut store = store.lock().expect("store lock");
        for back in 1..=2 {
            let day = today()
                .checked_sub_days(chrono::Days::new(back))
                .expect("recent date");
            store.logs.push(HabitLog {
                id: LogId::random(),
                habit_id,
                day,
                reflection: None,
            });
        }
    }

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/habits/{id}/toggle"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "completed": true, "streak": 3 }));

    // Toggling back off leaves yesterday's run standing.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/habits/{id}/toggle"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "completed": false, "streak": 2 }));
}

#[actix_web::test]
async fn reflection_needs_a_completed_day() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let cookie = register_user(&app, "ada@example.com").await;
    let id = create_habit(&app, &cookie, "Read").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/habits/{id}/reflection"))
            .cookie(cookie.clone())
            .set_json(json!({ "reflection": "felt good" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "No log found for today");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/habits/{id}/toggle"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/habits/{id}/reflection"))
            .cookie(cookie)
            .set_json(json!({ "reflection": "felt good" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn stats_reflect_the_trailing_window() {
    let (state, _store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let cookie = register_user(&app, "ada@example.com").await;
    let id = create_habit(&app, &cookie, "Read").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/habits/{id}/toggle"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/stats")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;

    let completion = body["completionData"].as_array().expect("completion data");
    assert_eq!(completion.len(), 30);
    let last = completion.last().expect("today's entry");
    assert_eq!(last["date"], today().format("%Y-%m-%d").to_string());
    assert_eq!(last["count"], 1);
    let total: u64 = completion
        .iter()
        .map(|e| e["count"].as_u64().expect("count"))
        .sum();
    assert_eq!(total, 1);

    assert_eq!(body["pieData"], json!([{ "name": "Read", "value": 1 }]));
    assert_eq!(
        body["streaks"],
        json!([{ "habit": "Read", "current": 1, "best": 1 }])
    );
}

#[actix_web::test]
async fn journal_groups_a_month_by_day() {
    let (state, store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let cookie = register_user(&app, "ada@example.com").await;
    let id = create_habit(&app, &cookie, "Read").await;
    let habit_id = HabitId::new(&id).expect("valid habit id");

    {
        let mut store = store.lock().expect("store lock");
        for (day, reflection) in [
            ("2026-02-10", Some("felt good")),
            ("2026-02-12", None),
            ("2026-03-01", None),
        ] {
            store.logs.push(HabitLog {
                id: LogId::random(),
                habit_id,
                day: day.parse().expect("valid date literal"),
                reflection: reflection.map(str::to_owned),
            });
        }
    }

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/journal?year=2026&month=2")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let days = body.as_object().expect("grouped days");
    assert_eq!(days.len(), 2);
    assert!(days.contains_key("2026-02-10"));
    assert!(days.contains_key("2026-02-12"));
    assert!(!days.contains_key("2026-03-01"));

    let first = &days["2026-02-10"];
    assert_eq!(first["date"], "2026-02-10");
    assert_eq!(first["habits"][0]["habitName"], "Read");
    assert_eq!(first["habits"][0]["completed"], true);
    assert_eq!(first["habits"][0]["reflection"], "felt good");
    assert_eq!(days["2026-02-12"]["habits"][0]["reflection"], "");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/journal")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn profile_and_onboarding_cover_the_session_user() {
    let (state, store) = memory_state();
    let app = test::init_service(App::new().service(api(state))).await;
    let cookie = register_user(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/user/profile")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "name": "Ada" }));

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/user/onboarding")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);

    let store = store.lock().expect("store lock");
    assert!(store.users[0].has_completed_onboarding);
}
