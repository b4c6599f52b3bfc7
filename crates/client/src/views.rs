//! View-model assembly for the school site.
//!
//! Each function here backs one page: it resolves the API base, issues
//! the data calls, and shapes the outcome into a context struct the
//! template layer renders. Errors arrive pre-rendered as strings -- a
//! page always gets a context, never a panic, even with the API down.

use serde_json::{json, Value};

use crate::auth::{ApiUser, SessionAuth};
use crate::base;
use crate::config::ClientConfig;
use crate::fetch::{ApiClient, FetchError, WriteOutcome};
use crate::paginate;

/// Fields shared by every page context.
#[derive(Debug, Clone)]
pub struct PageMeta {
    /// The resolved API base used for this page's calls.
    pub api_base: String,
    /// Whether any credential (session or service-level) is configured.
    pub has_token: bool,
    /// Rendered error banner, when something went wrong.
    pub error: Option<String>,
}

/// Context for the home page: entity counters plus connection status.
#[derive(Debug, Clone)]
pub struct HomeContext {
    pub meta: PageMeta,
    pub students_count: Option<i64>,
    pub courses_count: Option<i64>,
}

/// Context for a paginated listing page.
#[derive(Debug, Clone)]
pub struct ListContext {
    pub meta: PageMeta,
    pub rows: Vec<Value>,
    pub count: Option<i64>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Context for a per-entity sub-listing (a student's enrollments or
/// grades, a course's grades), aggregated across all pages.
#[derive(Debug, Clone)]
pub struct ItemsContext {
    pub meta: PageMeta,
    pub items: Vec<Value>,
}

/// Context for a create/edit form: the (re)displayed field values and the
/// field-keyed error map of the last rejected submission.
#[derive(Debug, Clone)]
pub struct FormContext {
    pub meta: PageMeta,
    pub data: Value,
    pub errors: Option<serde_json::Map<String, Value>>,
}

/// Student form fields, as submitted.
#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub nome: String,
    pub email: String,
    pub cpf: String,
    pub data_nascimento: String,
    pub celular: String,
}

impl StudentForm {
    fn to_payload(&self) -> Value {
        json!({
            "nome": self.nome,
            "email": self.email,
            "cpf": self.cpf,
            "data_nascimento": self.data_nascimento,
            "celular": self.celular,
        })
    }
}

/// Course form fields, as submitted.
#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub codigo: String,
    pub descricao: String,
    pub nivel: String,
}

impl CourseForm {
    fn to_payload(&self) -> Value {
        json!({
            "codigo": self.codigo,
            "descricao": self.descricao,
            "nivel": if self.nivel.is_empty() { "B" } else { self.nivel.as_str() },
        })
    }
}

/// The site's data layer: resolver + fetch client + aggregator behind
/// page-shaped methods.
pub struct SiteClient {
    api: ApiClient,
    config: ClientConfig,
}

impl SiteClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            api: ApiClient::new(&config),
            config,
        }
    }

    /// Resolve the API base for the current request.
    pub async fn resolve_base(&self, auth: &SessionAuth) -> String {
        base::resolve(&self.api, &self.config.api_base_url, auth).await
    }

    fn meta(&self, api_base: String, auth: &SessionAuth, error: Option<String>) -> PageMeta {
        PageMeta {
            api_base,
            has_token: auth.has_token(self.api.static_token()),
            error,
        }
    }

    // -----------------------------------------------------------------
    // Read pages
    // -----------------------------------------------------------------

    /// Home page: student and course counts. Calls are sequential; the
    /// first error wins the banner but both counters are attempted.
    pub async fn home(&self, auth: &SessionAuth) -> HomeContext {
        let base = self.resolve_base(auth).await;

        let students = self
            .api
            .fetch_json(&format!("{base}/estudantes/"), &[], auth)
            .await;
        let courses = self
            .api
            .fetch_json(&format!("{base}/cursos/"), &[], auth)
            .await;

        let error = first_error(&[&students, &courses]);
        HomeContext {
            students_count: students.ok().as_ref().and_then(count_of),
            courses_count: courses.ok().as_ref().and_then(count_of),
            meta: self.meta(base, auth, error),
        }
    }

    /// Paginated student listing.
    pub async fn students_list(&self, auth: &SessionAuth, page: u32) -> ListContext {
        self.collection_page(auth, "/estudantes/", page).await
    }

    /// Paginated course listing.
    pub async fn courses_list(&self, auth: &SessionAuth, page: u32) -> ListContext {
        self.collection_page(auth, "/cursos/", page).await
    }

    /// Paginated teacher listing.
    pub async fn professors_list(&self, auth: &SessionAuth, page: u32) -> ListContext {
        self.collection_page(auth, "/professores/", page).await
    }

    async fn collection_page(&self, auth: &SessionAuth, path: &str, page: u32) -> ListContext {
        let base = self.resolve_base(auth).await;
        let params = [("page", page.max(1).to_string())];

        match self
            .api
            .fetch_json(&format!("{base}{path}"), &params, auth)
            .await
        {
            Ok(payload) => ListContext {
                count: count_of(&payload),
                next: str_field(&payload, "next"),
                previous: str_field(&payload, "previous"),
                rows: rows_of(payload),
                meta: self.meta(base, auth, None),
            },
            Err(err) => ListContext {
                rows: Vec::new(),
                count: None,
                next: None,
                previous: None,
                meta: self.meta(base, auth, Some(err.render())),
            },
        }
    }

    /// A student's enrollments, aggregated across all pages.
    pub async fn student_enrollments(&self, auth: &SessionAuth, student_id: i64) -> ItemsContext {
        self.aggregated(auth, &format!("/estudantes/{student_id}/matriculas/"))
            .await
    }

    /// A student's grades (newest first), aggregated across all pages.
    pub async fn student_grades(&self, auth: &SessionAuth, student_id: i64) -> ItemsContext {
        self.aggregated(auth, &format!("/estudantes/{student_id}/notas/"))
            .await
    }

    /// A course's grades (newest first), aggregated across all pages.
    pub async fn course_grades(&self, auth: &SessionAuth, course_id: i64) -> ItemsContext {
        self.aggregated(auth, &format!("/cursos/{course_id}/notas/"))
            .await
    }

    async fn aggregated(&self, auth: &SessionAuth, path: &str) -> ItemsContext {
        let base = self.resolve_base(auth).await;
        let aggregated = paginate::fetch_all(&self.api, &base, path, auth).await;
        ItemsContext {
            meta: self.meta(
                base,
                auth,
                aggregated.error.as_ref().map(FetchError::render),
            ),
            items: aggregated.items,
        }
    }

    // -----------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------

    /// Log in against `/api-token-auth/`, storing the token and the
    /// cached `/me/` profile in the session on success. Returns the
    /// rendered error message on failure.
    pub async fn login(
        &self,
        auth: &mut SessionAuth,
        username: &str,
        password: &str,
    ) -> Result<(), String> {
        let base = self.resolve_base(auth).await;
        let body = json!({"username": username, "password": password});

        let outcome = self
            .api
            .post_json(&format!("{base}/api-token-auth/"), &body, auth)
            .await;

        match outcome {
            WriteOutcome::Accepted(payload) => {
                let token = payload
                    .get("token")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                match token {
                    Some(token) => {
                        auth.login(token);
                        // Best-effort profile cache; login stands even if
                        // /me/ is unavailable.
                        auth.user = self.fetch_profile(&base, auth).await;
                        Ok(())
                    }
                    None => Err("Response contained no token.".to_string()),
                }
            }
            WriteOutcome::Rejected(errors) => Err(errors
                .get("non_field_errors")
                .and_then(|v| v.get(0))
                .and_then(Value::as_str)
                .unwrap_or("Invalid credentials.")
                .to_string()),
        }
    }

    /// Drop the session's token and cached profile.
    pub fn logout(&self, auth: &mut SessionAuth) {
        auth.logout();
    }

    async fn fetch_profile(&self, base: &str, auth: &SessionAuth) -> Option<ApiUser> {
        let payload = self
            .api
            .fetch_json(&format!("{base}/me/"), &[], auth)
            .await
            .ok()?;
        serde_json::from_value(payload).ok()
    }

    // -----------------------------------------------------------------
    // Write forms
    // -----------------------------------------------------------------

    /// Submit a new student. On rejection the returned context redisplays
    /// the submitted values with inline errors.
    pub async fn student_create(
        &self,
        auth: &SessionAuth,
        form: &StudentForm,
    ) -> Result<(), FormContext> {
        let base = self.resolve_base(auth).await;
        let payload = form.to_payload();
        let outcome = self
            .api
            .post_json(&format!("{base}/estudantes/"), &payload, auth)
            .await;
        self.form_outcome(base, auth, payload, outcome)
    }

    /// Submit changes to an existing student.
    pub async fn student_edit(
        &self,
        auth: &SessionAuth,
        student_id: i64,
        form: &StudentForm,
    ) -> Result<(), FormContext> {
        let base = self.resolve_base(auth).await;
        let payload = form.to_payload();
        let outcome = self
            .api
            .put_json(&format!("{base}/estudantes/{student_id}/"), &payload, auth)
            .await;
        self.form_outcome(base, auth, payload, outcome)
    }

    /// Load a student into an edit form (GET prefill).
    pub async fn student_form_prefill(&self, auth: &SessionAuth, student_id: i64) -> FormContext {
        let base = self.resolve_base(auth).await;
        match self
            .api
            .fetch_json(&format!("{base}/estudantes/{student_id}/"), &[], auth)
            .await
        {
            Ok(data) => FormContext {
                meta: self.meta(base, auth, None),
                data,
                errors: None,
            },
            Err(err) => FormContext {
                meta: self.meta(base, auth, Some(err.render())),
                data: json!({}),
                errors: None,
            },
        }
    }

    /// Submit a new course.
    pub async fn course_create(
        &self,
        auth: &SessionAuth,
        form: &CourseForm,
    ) -> Result<(), FormContext> {
        let base = self.resolve_base(auth).await;
        let payload = form.to_payload();
        let outcome = self
            .api
            .post_json(&format!("{base}/cursos/"), &payload, auth)
            .await;
        self.form_outcome(base, auth, payload, outcome)
    }

    /// Submit changes to an existing course.
    pub async fn course_edit(
        &self,
        auth: &SessionAuth,
        course_id: i64,
        form: &CourseForm,
    ) -> Result<(), FormContext> {
        let base = self.resolve_base(auth).await;
        let payload = form.to_payload();
        let outcome = self
            .api
            .put_json(&format!("{base}/cursos/{course_id}/"), &payload, auth)
            .await;
        self.form_outcome(base, auth, payload, outcome)
    }

    fn form_outcome(
        &self,
        base: String,
        auth: &SessionAuth,
        payload: Value,
        outcome: WriteOutcome,
    ) -> Result<(), FormContext> {
        match outcome {
            WriteOutcome::Accepted(_) => Ok(()),
            WriteOutcome::Rejected(errors) => Err(FormContext {
                meta: self.meta(base, auth, None),
                data: payload,
                errors: Some(errors),
            }),
        }
    }
}

/// Total item count out of an envelope, or the length of a bare list
/// (non-paginated endpoints).
fn count_of(payload: &Value) -> Option<i64> {
    match payload {
        Value::Object(map) => map.get("count").and_then(Value::as_i64),
        Value::Array(items) => Some(items.len() as i64),
        _ => None,
    }
}

/// The rows of a collection payload: `results` of an envelope, or the
/// payload itself when it is already a list.
fn rows_of(payload: Value) -> Vec<Value> {
    match payload {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        Value::Array(rows) => rows,
        _ => Vec::new(),
    }
}

fn str_field(payload: &Value, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_string)
}

/// The first rendered error among the given results, if any.
fn first_error(results: &[&Result<Value, FetchError>]) -> Option<String> {
    results
        .iter()
        .find_map(|r| r.as_ref().err().map(FetchError::render))
}
