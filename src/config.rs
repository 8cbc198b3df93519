// 🔧 Server Configuration - read once from the environment at start-up
//
// PORT, BIND_ADDR, RESEND_API_KEY, RESEND_API_BASE, LEAD_INBOX, MAIL_FROM, LABEL_DRAFT_DEV

use anyhow::{Context as AnyhowContext, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_API_BASE: &str = "https://api.resend.com";
pub const DEFAULT_LEAD_INBOX: &str = "newbom@newbom.co.kr";
pub const DEFAULT_MAIL_FROM: &str = "Global Label AI <noreply@newbom.co.kr>";

#[derive(Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Provider key; `None` means mail is not configured
    pub api_key: Option<String>,
    pub api_base: String,
    /// Operator address that receives leads
    pub lead_inbox: String,
    pub mail_from: String,
    /// Log leads instead of failing when no key is configured
    pub dev_mode: bool,
}

// Custom Debug to avoid printing the API key
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("has_api_key", &self.api_key.is_some())
            .field("api_base", &self.api_base)
            .field("lead_inbox", &self.lead_inbox)
            .field("mail_from", &self.mail_from)
            .field("dev_mode", &self.dev_mode)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            lead_inbox: DEFAULT_LEAD_INBOX.to_string(),
            mail_from: DEFAULT_MAIL_FROM.to_string(),
            dev_mode: false,
        }
    }
}

impl ServerConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (blank values count as unset)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = ServerConfig::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => defaults.port,
        };

        Ok(ServerConfig {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            api_key: get("RESEND_API_KEY"),
            api_base: get("RESEND_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            lead_inbox: get("LEAD_INBOX").unwrap_or(defaults.lead_inbox),
            mail_from: get("MAIL_FROM").unwrap_or(defaults.mail_from),
            dev_mode: get("LABEL_DRAFT_DEV").map(|v| is_truthy(&v)).unwrap_or(false),
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
