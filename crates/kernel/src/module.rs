use async_trait::async_trait;
use utoipa_axum::router::OpenApiRouter;

use crate::settings::Settings;

/// Shared state handed to every lifecycle hook.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

/// One forward-only SQL script. `id` is unique within its module and
/// orders the module's scripts lexically.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// A unit of the application: a resource (authors, books) or an
/// infrastructure component (the database pool).
///
/// Lifecycle: `init` for every module, then migrations, then `start`.
/// `stop` runs in reverse once the HTTP server has drained.
#[async_trait]
pub trait Module: Sync + Send {
    /// Registry key, migration ledger key and log field.
    fn name(&self) -> &'static str;

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Handlers with their OpenAPI operations. Paths are absolute.
    fn routes(&self) -> OpenApiRouter {
        OpenApiRouter::new()
    }

    fn migrations(&self) -> Vec<Migration> {
        Vec::new()
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Release held resources such as pooled connections.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
