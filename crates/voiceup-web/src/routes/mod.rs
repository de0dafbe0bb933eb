//! Route handlers.

pub mod analysis;
pub mod analytics;
pub mod analyze;
pub mod conversations;
pub mod home;
pub mod messages;

use voiceup_core::VoiceupResult;

use crate::error::ApiResult;

/// Run database-bound work on the blocking thread pool.
pub(crate) async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> VoiceupResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}
