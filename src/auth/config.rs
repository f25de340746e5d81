use dotenvy::var;

#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_secs: u64,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let secret = var("SESSION_JWT_SECRET").expect("SESSION_JWT_SECRET must be set");
        let issuer = var("SESSION_JWT_ISSUER").unwrap_or_else(|_| "tableside".to_string());
        let audience = var("SESSION_JWT_AUDIENCE").unwrap_or_else(|_| "guests".to_string());
        // 12 hours, roughly one service day
        let expiry_secs = var("SESSION_JWT_EXPIRY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(12 * 60 * 60);
        Self {
            secret,
            issuer,
            audience,
            expiry_secs,
        }
    }
}
