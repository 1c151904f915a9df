use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::notification::Notifier;
use crate::application::services::link_service::LinkService;
use crate::application::{Dashboard, LinkServiceImpl};
use crate::config::Settings;
use crate::domain::auth::AuthProvider;
use crate::infrastructure::auth::local::LocalAuthProvider;
use crate::infrastructure::notifier::ConsoleNotifier;
use crate::infrastructure::repositories::sqlite::repository::SqliteLinkRepository;
use std::sync::Arc;
use tracing::debug;

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub link_repository: Arc<SqliteLinkRepository>,
    pub link_service: Arc<dyn LinkService>,
    pub auth: Arc<dyn AuthProvider>,
    pub notifier: Arc<dyn Notifier>,
}

impl ServiceContainer {
    /// Create all services with explicit dependency injection
    pub fn new(config: &Settings, color: bool) -> ApplicationResult<Self> {
        let link_repository = Self::create_repository(&config.db_url)?;
        let auth: Arc<dyn AuthProvider> = Arc::new(LocalAuthProvider::new(
            link_repository.pool().clone(),
            &config.session_file,
        ));
        let link_service: Arc<dyn LinkService> =
            Arc::new(LinkServiceImpl::new(link_repository.clone()));
        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier::new(color));

        Ok(Self {
            link_repository,
            link_service,
            auth,
            notifier,
        })
    }

    fn create_repository(db_url: &str) -> ApplicationResult<Arc<SqliteLinkRepository>> {
        debug!("Opening database {}", db_url);
        // Creates the file if needed and runs all migrations
        let repository = SqliteLinkRepository::from_url(db_url).map_err(|e| {
            ApplicationError::Other(format!("Failed to open link database {}: {}", db_url, e))
        })?;
        Ok(Arc::new(repository))
    }

    /// A fresh dashboard wired to the container's collaborators
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(
            self.auth.clone(),
            self.link_service.clone(),
            self.notifier.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Credentials;

    #[tokio::test]
    async fn given_settings_when_new_then_wires_working_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            db_url: dir.path().join("links.db").to_string_lossy().to_string(),
            session_file: dir.path().join("session.json").to_string_lossy().to_string(),
            ..Settings::default()
        };

        let container = ServiceContainer::new(&settings, false).unwrap();
        let mut dashboard = container.dashboard();
        dashboard
            .sign_up(&Credentials::new("alice@example.com", "secret1"))
            .await
            .unwrap();

        assert!(dashboard.current_user().is_some());
        assert!(dir.path().join("links.db").exists());
        assert!(dir.path().join("session.json").exists());
    }
}
