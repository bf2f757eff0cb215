use crate::app::command::{Command, HELP};
use crate::app::dashboard::Dashboard;
use crate::app::render::{render_json, render_table};
use crate::core::loader::CsvLoader;
use crate::core::session::{Route, Session};
use crate::core::window::WindowConfig;
use crate::core::{CsvSource, Notifier};
use crate::domain::notification::{Notification, NotificationEvent};
use crate::utils::error::{DashError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Continue(Option<String>),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// 應用程式外殼：持有 session、載入器與目前路由
pub struct App<S: CsvSource, N: Notifier + Clone> {
    session: Session,
    loader: CsvLoader<S>,
    window: WindowConfig,
    notifier: N,
    route: Route,
    dashboard: Option<Dashboard<N>>,
}

impl<S: CsvSource, N: Notifier + Clone> App<S, N> {
    pub fn new(loader: CsvLoader<S>, window: WindowConfig, notifier: N) -> Self {
        Self {
            session: Session::new(),
            loader,
            window,
            notifier,
            route: Route::Entry,
            dashboard: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<Route> {
        match self.session.login(username, password) {
            Ok(route) => {
                self.notifier
                    .notify(Notification::new(NotificationEvent::LoginSucceeded));
                self.navigate(route).await
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::new(NotificationEvent::LoginFailed));
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) -> Route {
        self.route = self.session.logout();
        self.dashboard = None;
        self.notifier
            .notify(Notification::new(NotificationEvent::LogoutSucceeded));
        self.route
    }

    /// 經過 session 守門後切換路由；首次進入儀表板時掛載並載入資料
    pub async fn navigate(&mut self, requested: Route) -> Result<Route> {
        let route = self.session.guard(requested);
        if route != requested {
            tracing::info!("↪️ Redirecting {} to {}", requested.path(), route.path());
        }
        self.route = route;

        if route == Route::Dashboard && self.dashboard.is_none() {
            let mut dashboard =
                Dashboard::mount(&self.session, self.window, self.notifier.clone())?;
            dashboard.load(&self.loader).await;
            self.dashboard = Some(dashboard);
        }
        Ok(route)
    }

    pub fn dashboard(&self) -> Result<&Dashboard<N>> {
        self.session.require_authenticated("read dashboard")?;
        self.dashboard.as_ref().ok_or_else(|| DashError::SessionRequired {
            operation: "read dashboard before it was mounted".to_string(),
        })
    }

    pub fn dashboard_mut(&mut self) -> Result<&mut Dashboard<N>> {
        self.session.require_authenticated("update dashboard")?;
        self.dashboard.as_mut().ok_or_else(|| DashError::SessionRequired {
            operation: "update dashboard before it was mounted".to_string(),
        })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let dashboard = self.dashboard()?;
        if let Some(message) = dashboard.status_message() {
            return Ok(message.to_string());
        }
        let snapshot = dashboard.snapshot();
        match format {
            OutputFormat::Table => Ok(render_table(&snapshot)),
            OutputFormat::Json => render_json(&snapshot),
        }
    }

    pub async fn execute(&mut self, command: Command, format: OutputFormat) -> Result<Step> {
        match command {
            Command::Quit => return Ok(Step::Quit),
            Command::Help => return Ok(Step::Continue(Some(HELP.to_string()))),
            Command::Login { username, password } => {
                self.login(&username, &password).await?;
                return Ok(Step::Continue(Some(self.render(format)?)));
            }
            Command::Logout => {
                let route = self.logout();
                return Ok(Step::Continue(Some(format!("Logged out ({})", route.path()))));
            }
            _ => {}
        }

        // 其餘指令都需要儀表板，未登入時導回入口
        if self.navigate(Route::Dashboard).await? != Route::Dashboard {
            return Ok(Step::Continue(Some(
                "Please log in first: login <user> <password>".to_string(),
            )));
        }

        let dashboard = self.dashboard_mut()?;
        match command {
            Command::Search(term) => dashboard.set_search(term),
            Command::Sort(column) => {
                dashboard.click_header(column);
            }
            Command::Scroll(px) => {
                dashboard.scroll_to(px);
            }
            Command::Page(pages) => {
                dashboard.page(pages);
            }
            _ => {}
        }
        Ok(Step::Continue(Some(self.render(format)?)))
    }
}
