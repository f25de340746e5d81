#[derive(Clone, Debug)]
pub enum Principal {
    User { user_id: i32, name: String },
    Admin { user_id: i32, name: String },
}

impl Principal {
    pub fn user_id(&self) -> i32 {
        match self {
            Principal::User { user_id, .. } | Principal::Admin { user_id, .. } => *user_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Principal::User { name, .. } | Principal::Admin { name, .. } => name,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Admin { .. })
    }
}
