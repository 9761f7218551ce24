use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct FirebaseSettings {
    pub project_id: String,
    pub jwks_url: String,
}

impl FirebaseSettings {
    /// Issuer Firebase stamps on ID tokens minted for this project.
    pub fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}
