use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,

    // Fixed sentinel pair that answers as the administrator.
    pub admin_employee_id: String,
    pub admin_mobile_number: String,

    // Rate limiting
    pub rate_auth_per_min: u32,
    pub rate_upload_per_min: u32,
    pub rate_api_per_min: u32,

    pub api_prefix: String,

    pub cache_warmup_batch: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            admin_employee_id: env::var("ADMIN_EMPLOYEE_ID")
                .unwrap_or_else(|_| "ant05".to_string()),
            admin_mobile_number: env::var("ADMIN_MOBILE_NUMBER")
                .unwrap_or_else(|_| "0000000000".to_string()),

            rate_auth_per_min: env::var("RATE_AUTH_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_upload_per_min: env::var("RATE_UPLOAD_PER_MIN")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),
            rate_api_per_min: env::var("RATE_API_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            cache_warmup_batch: env::var("CACHE_WARMUP_BATCH")
                .unwrap_or_else(|_| "250".to_string())
                .parse()
                .unwrap(),
        }
    }
}
