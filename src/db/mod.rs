mod pool;

use sqlx::PgPool;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{DataError, Result};
use crate::models::{Limits, NewProject, NewUser, Project, SignIn, SignInOutcome, User};
use crate::password;

pub use pool::{ConnectionSettings, Driver, PoolSettings};

const PROJECT_COLUMNS: &str = r#""idProject", "title", "isDone", "deadlineDate""#;

/// Database connection pool
///
/// Cloning is cheap: clones share the same pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance from loaded configuration
    pub async fn new(config: &Config) -> Result<Self> {
        Self::configure(&config.connection_settings()).await
    }

    /// Open the pool and verify the server answers the liveness query.
    pub async fn configure(settings: &ConnectionSettings) -> Result<Self> {
        let pool = pool::create_pool(settings).await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool without probing it.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Re-run the liveness query on a pooled connection.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query(pool::LIVENESS_QUERY).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    // Project operations
    pub async fn insert_project(&self, project: &NewProject) -> Result<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO "Project" ("title", "isDone", "deadlineDate")
            VALUES ($1, $2, $3)
            RETURNING "idProject"
            "#,
        )
        .bind(&project.title)
        .bind(project.is_done)
        .bind(project.deadline_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(title = %project.title, error = %e, "failed to insert project");
            DataError::from(e)
        })?;

        debug!(project_id = id, "inserted project");
        Ok(id)
    }

    /// Every project, unpaginated.
    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        let query = format!(r#"SELECT {PROJECT_COLUMNS} FROM "Project" ORDER BY "idProject" ASC"#);
        let projects = sqlx::query_as::<_, Project>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    /// Projects of `user_id` with the given completion flag that are due on
    /// or before `limits.due_by`, earliest deadline first, at most
    /// `limits.count` of them.
    pub async fn get_user_projects(
        &self,
        user_id: i32,
        limits: &Limits,
        is_done: bool,
    ) -> Result<Vec<Project>> {
        let query = format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM "Project"
            WHERE "idProject" IN (
                SELECT "Project_id" FROM "Project_has_User" WHERE "User_id" = $1
            )
            AND "isDone" = $2
            AND "deadlineDate" <= $3
            ORDER BY "deadlineDate" ASC, "idProject" ASC
            LIMIT $4
            "#
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(is_done)
            .bind(limits.due_by)
            .bind(limits.sql_limit())
            .fetch_all(&self.pool)
            .await?;

        debug_assert!(projects.iter().all(|p| limits.admits(p.deadline_date)));
        debug!(user_id, count = projects.len(), "fetched user projects");
        Ok(projects)
    }

    /// Projects of `user_id` where the association carries exactly `role`.
    pub async fn get_user_projects_role(&self, user_id: i32, role: &str) -> Result<Vec<Project>> {
        let query = format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM "Project"
            WHERE "idProject" IN (
                SELECT "Project_id" FROM "Project_has_User"
                WHERE "User_id" = $1 AND "role" = $2
            )
            ORDER BY "idProject" ASC
            "#
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(role)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    /// Ids of the projects `user_id` holds with `role`, for authorization checks.
    pub async fn create_auth_project_list(&self, user_id: i32, role: &str) -> Result<Vec<i32>> {
        let projects = self.get_user_projects_role(user_id, role).await?;

        Ok(projects.into_iter().map(|p| p.id).collect())
    }

    // User operations
    pub async fn user_exists(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM "User" WHERE "mail" = $1)"#)
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Store a new user with a hashed password and return its id.
    ///
    /// The caller's `is_admin` and `num_projects` are ignored; both are stored as 0.
    pub async fn insert_user(&self, user: &NewUser) -> Result<i32> {
        let password_hash = password::hash_password(&user.password)?;

        let result: std::result::Result<i32, sqlx::Error> = sqlx::query_scalar(
            r#"
            INSERT INTO "User" ("mail", "firstname", "lastname", "password", "isAdmin", "numProjects")
            VALUES ($1, $2, $3, $4, 0, 0)
            RETURNING "idUser"
            "#,
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => {
                debug!(user_id = id, "inserted user");
                Ok(id)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DataError::DuplicateEmail(user.email.clone()))
            }
            Err(e) => {
                warn!(error = %e, "failed to insert user");
                Err(e.into())
            }
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT "idUser", "mail", "firstname", "lastname", "password", "isAdmin", "numProjects"
            FROM "User"
            WHERE "mail" = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn check_sign_in(&self, signin: &SignIn) -> Result<SignInOutcome> {
        let user = self.get_user_by_email(&signin.email).await?;
        let outcome = evaluate_sign_in(user.as_ref(), &signin.password)?;

        if !outcome.is_success() {
            debug!(email = %signin.email, ?outcome, "sign-in rejected");
        }
        Ok(outcome)
    }
}

fn evaluate_sign_in(user: Option<&User>, password: &str) -> Result<SignInOutcome> {
    let Some(user) = user else {
        return Ok(SignInOutcome::UserNotFound);
    };

    if password::verify_password(password, &user.password)? {
        Ok(SignInOutcome::Success(user.id))
    } else {
        Ok(SignInOutcome::PasswordMismatch)
    }
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;

    Ok(db)
}
