use crate::utils::error::{DashError, Result};
use serde::Serialize;

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
    Entry,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Dashboard => "/dashboard",
        }
    }
}

/// 單次執行的登入狀態，啟動時建立並以參考傳遞，不做持久化
#[derive(Debug, Default)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// 帳密去除前後空白後與固定值比對；失敗時狀態不變
    pub fn login(&mut self, username: &str, password: &str) -> Result<Route> {
        if username.trim() == DEMO_USERNAME && password.trim() == DEMO_PASSWORD {
            self.authenticated = true;
            tracing::info!("🔓 Logged in as {}", DEMO_USERNAME);
            Ok(Route::Dashboard)
        } else {
            tracing::warn!("🔒 Rejected login for user '{}'", username.trim());
            Err(DashError::InvalidCredentials)
        }
    }

    pub fn logout(&mut self) -> Route {
        self.authenticated = false;
        tracing::info!("👋 Logged out");
        Route::Entry
    }

    /// 未登入時要求儀表板會被導回入口，已登入時入口導向儀表板
    pub fn guard(&self, requested: Route) -> Route {
        match (requested, self.authenticated) {
            (Route::Dashboard, false) => Route::Entry,
            (Route::Entry, true) => Route::Dashboard,
            (route, _) => route,
        }
    }

    pub fn require_authenticated(&self, operation: &str) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(DashError::SessionRequired {
                operation: operation.to_string(),
            })
        }
    }
}
