pub fn init() {
    dotenv::dotenv().ok();
}

pub fn get_storage_url() -> String {
    std::env::var("STORAGE_URL").unwrap_or_else(|_| {
        eprintln!("STORAGE_URL not found in environment or .env file.");
        std::process::exit(1);
    })
}

pub fn get_storage_bucket() -> String {
    std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| {
        println!("STORAGE_BUCKET not found in environment, using default 'documents'");
        "documents".to_string()
    })
}

pub fn get_storage_api_key() -> String {
    std::env::var("STORAGE_API_KEY").unwrap_or_else(|_| {
        eprintln!("STORAGE_API_KEY not found in environment or .env file.");
        std::process::exit(1);
    })
}

pub fn get_notify_webhook_url() -> Option<String> {
    std::env::var("NOTIFY_WEBHOOK_URL").ok()
}

/// Outside production the storage endpoint often runs with a self-signed
/// certificate, so certificate verification follows this flag.
pub fn is_production() -> bool {
    std::env::var("APP_ENV")
        .map(|env| env == "production")
        .unwrap_or(false)
}
