//! HTTP access to the HomeCenter control panel
//!
//! The panel is a PHP application guarded by a session cookie: a plain GET on
//! the login page hands out the cookie, and the login POST answers with the
//! full panel markup.

use reqwest::{redirect, Client, StatusCode};
use tracing::{error, info};

use super::HubError;

const LOGIN_PATH: &str = "/plug/index.php";
const CHECK_PATH: &str = "/plug/index.php?action=check";

/// The panel only renders the tablet layout for browser-like clients
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/535.2 \
    (KHTML, like Gecko) Chrome/15.0.874.121 Safari/535.2";

/// Session-carrying client for one hub
pub struct HubClient {
    http: Client,
    server: String,
    username: String,
    password: String,
}

impl HubClient {
    /// Create a client for the hub at `server` (host or host:port)
    pub fn new(server: &str, username: &str, password: &str) -> Result<Self, HubError> {
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            http,
            server: server.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.server, path)
    }

    /// Log in and return the control panel markup
    pub async fn fetch_control_panel(&self) -> Result<String, HubError> {
        self.open_session().await;

        info!("logging in");
        let form = [
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("selectMode", "tablet"),
            ("screenwidth", "1349"),
            ("screenheight", "637"),
            ("Submit", "Login"),
        ];

        let response = self.http.post(self.url(CHECK_PATH)).form(&form).send().await?;

        let status = response.status();
        if status == StatusCode::OK {
            info!("control panel request completed");
        } else {
            error!(%status, "control panel request did not succeed");
        }

        Ok(response.text().await?)
    }

    /// Pick up the PHP session cookie. A failure is not fatal: the login
    /// POST may still establish a session on its own.
    async fn open_session(&self) {
        info!("requesting session cookie from login page");
        match self.http.get(self.url(LOGIN_PATH)).send().await {
            Ok(response) => {
                let cookies = response.cookies().count();
                info!(cookies, "session cookie stored");
            }
            Err(e) => {
                error!(?e, "failed to reach the login page");
            }
        }
    }
}
