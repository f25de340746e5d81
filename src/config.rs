use dotenvy::var;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub admin_email: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = var("DATABASE_URL").expect("DATABASE_URL must be set");
        let host = var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let admin_email = var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@foodapp.com".to_string());
        let admin_password = var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            warn!("ADMIN_PASSWORD not set, seeding the default admin password");
            "admin123".to_string()
        });
        Self {
            database_url,
            host,
            port,
            admin_email,
            admin_password,
        }
    }
}

/// Delivery surcharge applied to carts whose subtotal is below the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingConfig {
    pub delivery_charge: f64,
    pub free_delivery_threshold: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            delivery_charge: 50.0,
            free_delivery_threshold: 200.0,
        }
    }
}

impl PricingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let delivery_charge = var("DELIVERY_CHARGE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(defaults.delivery_charge);
        let free_delivery_threshold = var("FREE_DELIVERY_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(defaults.free_delivery_threshold);
        Self {
            delivery_charge,
            free_delivery_threshold,
        }
    }
}
