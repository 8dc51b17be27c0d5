use std::env;

/// Fallback allow-list used when ADMIN_EMAILS is not configured.
pub const DEFAULT_ADMIN_EMAILS: &[&str] = &["sarangraut5900@gmail.com", "amruta123@gmail.com"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub admin_emails: Vec<String>,
}

impl AppConfig {
    /// Reads configuration from the environment (after `dotenv` has run).
    /// Only DATABASE_URL is mandatory.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env");
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);
        let admin_emails = match env::var("ADMIN_EMAILS") {
            Ok(raw) => parse_admin_emails(&raw),
            Err(_) => DEFAULT_ADMIN_EMAILS.iter().map(|s| s.to_string()).collect(),
        };

        Self {
            database_url,
            host,
            port,
            admin_emails,
        }
    }
}

fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_emails_split_on_commas_and_trimmed() {
        let parsed = parse_admin_emails(" a@x.com, b@y.com ,,c@z.com ");
        assert_eq!(parsed, vec!["a@x.com", "b@y.com", "c@z.com"]);
    }

    #[test]
    fn empty_admin_emails_value_yields_empty_list() {
        assert!(parse_admin_emails("").is_empty());
    }
}
