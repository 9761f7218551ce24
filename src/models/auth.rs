use serde::{Deserialize, Serialize};
use secrecy::{ExposeSecret, SecretString};
use validator::Validate;

use crate::errors::AppError;
use crate::models::user::{Goal, UserSummary};

/// Body of `POST /auth/send-otp`. Federated sign-ups omit the password and
/// carry the provider token instead.
#[derive(Deserialize, Validate)]
pub struct SendOtpRequest {
    pub name: Option<String>,
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: Option<i32>,
    pub gender: Option<String>,
    #[validate(range(min = 1.0, max = 300.0, message = "Height must be between 1 and 300 cm"))]
    pub height: Option<f64>,
    #[validate(range(min = 1.0, max = 500.0, message = "Weight must be between 1 and 500 kg"))]
    pub weight: Option<f64>,
    pub goal: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::models::user::deserialize_optional_secret_string")]
    pub password: Option<SecretString>,
    #[serde(default, rename = "isGoogleUser")]
    pub is_google_user: bool,
    #[serde(default, rename = "googleToken")]
    pub google_token: Option<String>,
}

impl std::fmt::Display for SendOtpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Email: {}, Google: {}",
            self.email.as_deref().unwrap_or("<missing>"),
            self.is_google_user
        )
    }
}

/// Registration fields that survived validation, before the password is hashed.
pub struct RegistrationForm {
    pub name: Option<String>,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub goal: Goal,
    pub email: String,
    pub credential: RegistrationCredential,
}

pub enum RegistrationCredential {
    Password(SecretString),
    Google { token: String },
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

impl TryFrom<SendOtpRequest> for RegistrationForm {
    type Error = AppError;

    fn try_from(req: SendOtpRequest) -> Result<Self, Self::Error> {
        req.validate()?;

        let email = required_text(req.email, "email")?.to_lowercase();
        let age = required(req.age, "age")?;
        let gender = required_text(req.gender, "gender")?;
        let height = required(req.height, "height")?;
        let weight = required(req.weight, "weight")?;
        let goal: Goal = required_text(req.goal, "goal")?.parse()?;

        let (name, credential) = if req.is_google_user {
            let token = required_text(req.google_token, "googleToken")?;
            (req.name.filter(|n| !n.trim().is_empty()), RegistrationCredential::Google { token })
        } else {
            let name = required_text(req.name, "name")?;
            let password = required(req.password, "password")?;
            let length = password.expose_secret().len();
            if length == 0 {
                return Err(AppError::Validation("password is required".to_string()));
            }
            // bcrypt silently ignores everything past 72 bytes
            if length > 72 {
                return Err(AppError::Validation("password must be at most 72 bytes".to_string()));
            }
            (Some(name), RegistrationCredential::Password(password))
        };

        Ok(RegistrationForm { name, age, gender, height, weight, goal, email, credential })
    }
}

/// Snapshot kept with a pending registration until the code is verified.
/// Only the password hash is stored, never the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRegistrationData {
    pub name: Option<String>,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub goal: Goal,
    pub email: String,
    pub password_hash: Option<String>,
    #[serde(rename = "isGoogleUser")]
    pub is_google_user: bool,
    #[serde(rename = "googleToken")]
    pub google_token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SendOtpResponse {
    pub message: String,
    pub email: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

#[derive(Deserialize, Debug)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ResendOtpRequest {
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    #[serde(default,
            serialize_with = "serialize_optional_secret",
            deserialize_with = "crate::models::user::deserialize_optional_secret_string")]
    pub password: Option<SecretString>,
}

fn serialize_optional_secret<S>(_: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("[REDACTED]")
}

#[derive(Deserialize, Debug)]
pub struct GoogleLoginRequest {
    pub token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NewGoogleUser {
    pub name: Option<String>,
    pub email: String,
    pub picture: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GoogleNewUserResponse {
    #[serde(rename = "isNewUser")]
    pub is_new_user: bool,
    /// The caller's own Google token, echoed back for the registration step.
    pub token: String,
    pub user: NewGoogleUser,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> SendOtpRequest {
        SendOtpRequest {
            name: Some("Ada".into()),
            age: Some(30),
            gender: Some("female".into()),
            height: Some(170.0),
            weight: Some(60.0),
            goal: Some("maintenance".into()),
            email: Some("Ada@Example.com".into()),
            password: Some(SecretString::new("hunter22".into())),
            is_google_user: false,
            google_token: None,
        }
    }

    #[test]
    fn password_registration_requires_a_password() {
        let req = SendOtpRequest { password: None, ..base_request() };
        let err = RegistrationForm::try_from(req).err().unwrap();
        assert_eq!(err.to_string(), "password is required");
    }

    #[test]
    fn email_is_normalised() {
        let form = RegistrationForm::try_from(base_request()).ok().unwrap();
        assert_eq!(form.email, "ada@example.com");
    }

    #[test]
    fn google_registration_needs_a_token_but_no_password() {
        let req = SendOtpRequest {
            password: None,
            name: None,
            is_google_user: true,
            google_token: Some("id-token".into()),
            ..base_request()
        };
        let form = RegistrationForm::try_from(req).ok().unwrap();
        assert!(matches!(form.credential, RegistrationCredential::Google { .. }));

        let missing = SendOtpRequest {
            password: None,
            is_google_user: true,
            ..base_request()
        };
        assert!(RegistrationForm::try_from(missing).is_err());
    }

    #[test]
    fn invalid_goal_is_rejected() {
        let req = SendOtpRequest { goal: Some("bulk".into()), ..base_request() };
        assert!(matches!(RegistrationForm::try_from(req), Err(AppError::Validation(_))));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let req = SendOtpRequest { email: Some("not-an-email".into()), ..base_request() };
        assert!(matches!(RegistrationForm::try_from(req), Err(AppError::Validation(_))));
    }
}
