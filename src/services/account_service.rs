use std::sync::Arc;
use chrono::{NaiveDate, Utc};
use secrecy::ExposeSecret;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::auth::jwt::generate_token;
use crate::config::jwt::JwtSettings;
use crate::db::{accounts, weekly_plans};
use crate::db::accounts::NewAccount;
use crate::db::helpers::require_record;
use crate::errors::{is_unique_violation, AppError};
use crate::game::streak::{is_broken, local_today};
use crate::models::auth::{
    AuthResponse, GoogleNewUserResponse, NewGoogleUser, PendingRegistrationData, RegistrationCredential,
    RegistrationForm,
};
use crate::models::plan::{WeeklyPlan, WeeklyPlanRow};
use crate::models::user::{Account, Goal, ProfileChanges, UserRole, UserSummary};
use crate::services::identity::IdentityVerifier;
use crate::services::otp_store::{IssuedCode, OtpError, OtpStore};
use crate::utils::password::{hash_password, verify_password};
use crate::workout::plan_generator::generate_week;

const FALLBACK_NAME: &str = "Warrior";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Outcome of a Google sign-in.
pub enum GoogleLogin {
    Existing(AuthResponse),
    NewUser(GoogleNewUserResponse),
}

/// Account lifecycle: registration, sign-in and profile maintenance.
pub struct AccountService {
    pool: PgPool,
    otp_store: Arc<OtpStore>,
    identity: Arc<dyn IdentityVerifier>,
    jwt: JwtSettings,
}

impl AccountService {
    pub fn new(
        pool: PgPool,
        otp_store: Arc<OtpStore>,
        identity: Arc<dyn IdentityVerifier>,
        jwt: JwtSettings,
    ) -> Self {
        Self { pool, otp_store, identity, jwt }
    }

    /// Snapshots the form, with the password already hashed, and emails a code.
    #[tracing::instrument(name = "Start registration", skip(self, form), fields(email = %form.email))]
    pub async fn start_registration(&self, form: RegistrationForm) -> Result<IssuedCode, AppError> {
        let (password_hash, google_token) = match form.credential {
            RegistrationCredential::Password(password) => {
                (Some(hash_password(password.expose_secret().to_string()).await?), None)
            }
            RegistrationCredential::Google { token } => (None, Some(token)),
        };

        let payload = PendingRegistrationData {
            name: form.name,
            age: form.age,
            gender: form.gender,
            height: form.height,
            weight: form.weight,
            goal: form.goal,
            email: form.email,
            password_hash,
            is_google_user: google_token.is_some(),
            google_token,
        };

        Ok(self.otp_store.issue(&payload).await?)
    }

    /// Consumes the code and creates the account with its seven plan days.
    /// Nothing is written unless every step succeeds. Google verification and
    /// hashing run before the pending row is locked.
    #[tracing::instrument(name = "Complete registration", skip(self, code))]
    pub async fn complete_registration(&self, email: &str, code: &str) -> Result<AuthResponse, AppError> {
        let now = Utc::now();
        let prepared = match self.otp_store.peek(email, code, now).await {
            Ok(payload) => {
                let credential = self.credential_for(&payload).await?;
                Some((payload, credential))
            }
            // consume below deletes the expired row
            Err(OtpError::Expired) => None,
            Err(e) => return Err(e.into()),
        };

        let mut tx = self.pool.begin().await?;

        let payload = match OtpStore::consume(&mut *tx, email, code, now).await {
            Ok(payload) => payload,
            Err(OtpError::Expired) => {
                tx.commit().await?;
                return Err(OtpError::Expired.into());
            }
            Err(e) => return Err(e.into()),
        };

        let (name, password_hash) = match prepared {
            Some((checked, credential)) if checked == payload => credential,
            _ => {
                tracing::warn!("Pending registration changed while it was being verified");
                return Err(AppError::Conflict("Registration changed while verifying. Please try again.".to_string()));
            }
        };

        let account = Self::create_account(&mut *tx, &payload, &name, &password_hash).await?;
        tx.commit().await?;

        tracing::info!("Account {} registered", account.id);
        self.session_for(&account, "Registration successful")
    }

    async fn credential_for(&self, payload: &PendingRegistrationData) -> Result<(String, String), AppError> {
        if !payload.is_google_user {
            let name = payload.name.clone().unwrap_or_else(|| FALLBACK_NAME.to_string());
            let hash = payload
                .password_hash
                .clone()
                .ok_or_else(|| AppError::Dependency("Pending registration has no password hash".to_string()))?;
            return Ok((name, hash));
        }

        let token = payload
            .google_token
            .as_deref()
            .ok_or_else(|| AppError::Validation("googleToken is required".to_string()))?;
        let identity = self.identity.verify(token).await?;

        if identity.email.as_deref() != Some(payload.email.as_str()) {
            return Err(AppError::Unauthorized("Google account does not match registration email".to_string()));
        }

        let name = identity
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| payload.name.clone())
            .unwrap_or_else(|| FALLBACK_NAME.to_string());
        // federated accounts never sign in with this, it only fills the column
        let hash = hash_password(format!("{}:{}", identity.uid, Uuid::new_v4())).await?;
        Ok((name, hash))
    }

    async fn create_account(
        conn: &mut PgConnection,
        payload: &PendingRegistrationData,
        name: &str,
        password_hash: &str,
    ) -> Result<Account, AppError> {
        let new_account = NewAccount {
            id: Uuid::new_v4(),
            name,
            age: payload.age,
            gender: &payload.gender,
            height: payload.height,
            weight: payload.weight,
            goal: payload.goal,
            email: &payload.email,
            password_hash,
            role: UserRole::User,
        };

        let account = accounts::insert_account(&mut *conn, &new_account).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Email already registered".to_string())
            } else {
                e.into()
            }
        })?;

        for plan in generate_week(payload.goal) {
            weekly_plans::upsert_day(&mut *conn, account.id, &plan).await?;
        }

        Ok(account)
    }

    #[tracing::instrument(name = "Password login", skip(self, password))]
    pub async fn login(&self, email: &str, password: String) -> Result<AuthResponse, AppError> {
        let account = accounts::find_by_email(&self.pool, &email.to_lowercase())
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(password, account.password_hash.clone()).await? {
            tracing::info!("Wrong password for account {}", account.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        self.session_for(&account, "Login successful")
    }

    #[tracing::instrument(name = "Google login", skip(self, id_token))]
    pub async fn google_login(&self, id_token: &str) -> Result<GoogleLogin, AppError> {
        let identity = self.identity.verify(id_token).await?;
        let email = identity
            .email
            .ok_or_else(|| AppError::Validation("Email is required from Google".to_string()))?;

        match accounts::find_by_email(&self.pool, &email).await? {
            Some(account) => Ok(GoogleLogin::Existing(self.session_for(&account, "Login successful")?)),
            None => Ok(GoogleLogin::NewUser(GoogleNewUserResponse {
                is_new_user: true,
                token: id_token.to_string(),
                user: NewGoogleUser { name: identity.name, email, picture: identity.picture },
            })),
        }
    }

    fn session_for(&self, account: &Account, message: &str) -> Result<AuthResponse, AppError> {
        let token = generate_token(account.id, &account.email, account.role()?, &self.jwt)?;
        Ok(AuthResponse {
            message: message.to_string(),
            token,
            user: UserSummary::from(account),
        })
    }

    pub async fn profile(&self, account_id: Uuid) -> Result<Account, AppError> {
        self.profile_on(account_id, local_today()).await
    }

    /// Reads the account, zeroing a streak that lapsed before `today`.
    #[tracing::instrument(name = "Read profile", skip(self))]
    pub async fn profile_on(&self, account_id: Uuid, today: NaiveDate) -> Result<Account, AppError> {
        let mut account = require_record(accounts::find_by_id(&self.pool, account_id).await, "User not found")?;

        if is_broken(account.streak_state(), today) {
            if accounts::reset_streak(&self.pool, account_id, today).await? > 0 {
                tracing::info!("Streak of {} days lapsed for {}", account.streak_count, account_id);
                account.streak_count = 0;
            } else {
                // Activity landed between the read and the reset.
                account = require_record(accounts::find_by_id(&self.pool, account_id).await, "User not found")?;
            }
        }

        Ok(account)
    }

    /// Applies a partial update. A goal in the update rebuilds all seven
    /// plan days from that goal's templates.
    #[tracing::instrument(name = "Update profile", skip(self))]
    pub async fn update_profile(&self, account_id: Uuid, changes: &ProfileChanges) -> Result<Account, AppError> {
        let mut tx = self.pool.begin().await?;

        let account = accounts::update_profile(&mut *tx, account_id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(goal) = changes.goal {
            Self::regenerate_plans(&mut *tx, account_id, goal).await?;
            tracing::info!("Weekly plans regenerated for goal {}", goal.as_str());
        }

        tx.commit().await?;
        Ok(account)
    }

    async fn regenerate_plans(conn: &mut PgConnection, account_id: Uuid, goal: Goal) -> Result<(), sqlx::Error> {
        for plan in generate_week(goal) {
            weekly_plans::upsert_day(&mut *conn, account_id, &plan).await?;
        }
        Ok(())
    }

    /// All seven plan days, generating them from the account's goal if the
    /// account has none yet.
    pub async fn weekly_plans(&self, account_id: Uuid) -> Result<Vec<WeeklyPlan>, AppError> {
        let rows = weekly_plans::list(&self.pool, account_id).await?;
        if !rows.is_empty() {
            return Ok(rows.into_iter().map(WeeklyPlan::from).collect());
        }

        let account = require_record(accounts::find_by_id(&self.pool, account_id).await, "User not found")?;
        let goal: Goal = account.goal.parse()?;

        let mut tx = self.pool.begin().await?;
        for plan in generate_week(goal) {
            weekly_plans::insert_day_if_absent(&mut *tx, account_id, &plan).await?;
        }
        tx.commit().await?;

        let rows: Vec<WeeklyPlanRow> = weekly_plans::list(&self.pool, account_id).await?;
        Ok(rows.into_iter().map(WeeklyPlan::from).collect())
    }
}
