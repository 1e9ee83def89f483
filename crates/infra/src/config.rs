use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Credentials for the outbound Alimtalk gateway. `None` is a valid
    /// configuration state: reminder runs still mark processed windows,
    /// they just skip dispatch.
    pub dispatch: Option<DispatchSettings>,
    /// Page size used when enumerating candidate matches. The candidate
    /// set is unbounded, so enumeration always pages.
    pub candidate_page_size: i64,
}

/// Solapi / Kakao business channel credentials
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub api_key: String,
    pub api_secret: String,
    /// Sender phone number registered with the provider
    pub sender: String,
    /// Kakao business channel profile id
    pub kakao_pf_id: String,
}

const DISPATCH_ENV_VARS: [&str; 4] = [
    "SOLAPI_API_KEY",
    "SOLAPI_API_SECRET",
    "SOLAPI_SENDER",
    "KAKAO_PFID",
];

impl Config {
    pub fn new() -> Self {
        let default_page_size = "100";
        let page_size = std::env::var("CANDIDATE_PAGE_SIZE").unwrap_or(default_page_size.into());
        let candidate_page_size = match page_size.parse::<i64>() {
            Ok(size) if size > 0 => size,
            _ => {
                warn!(
                    "The given CANDIDATE_PAGE_SIZE: {} is not valid, falling back to the default: {}.",
                    page_size, default_page_size
                );
                default_page_size.parse::<i64>().unwrap()
            }
        };

        Self {
            dispatch: Self::dispatch_settings_from_env(),
            candidate_page_size,
        }
    }

    fn dispatch_settings_from_env() -> Option<DispatchSettings> {
        let mut values = DISPATCH_ENV_VARS
            .iter()
            .map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()));

        match (
            values.next().flatten(),
            values.next().flatten(),
            values.next().flatten(),
            values.next().flatten(),
        ) {
            (Some(api_key), Some(api_secret), Some(sender), Some(kakao_pf_id)) => {
                Some(DispatchSettings {
                    api_key,
                    api_secret,
                    sender,
                    kakao_pf_id,
                })
            }
            _ => {
                info!(
                    "Not all of {:?} are set. The dispatch gateway is disabled and reminder runs will only mark windows as processed.",
                    DISPATCH_ENV_VARS
                );
                None
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
