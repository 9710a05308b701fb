//! Shared plumbing for frame-side code.

use frame_telemetry::log_frame_event;
use sf_01_frame_lifecycle::{BootstrappedFrame, FrameBootstrap, FrameContext, FrameProfile};
use std::any::Any;
use std::sync::Arc;

/// Called with each child instance once its handshake completed.
pub type ChildReady<C> = Arc<dyn Fn(Arc<C>) + Send + Sync>;

/// Run the bootstrap for `context` in the background. `on_ready` runs
/// before the parent is told the frame is ready.
pub(crate) fn spawn_child<F>(
    bootstrap: Arc<FrameBootstrap>,
    context: FrameContext,
    profile: FrameProfile,
    on_ready: F,
) where
    F: FnOnce(&BootstrappedFrame) + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = bootstrap.run_with(&context, &profile, on_ready).await {
            log_frame_event!(
                warn,
                profile.integration,
                "Frame bootstrap failed",
                context.name,
                error = %e
            );
        }
    });
}

/// Keep `child` alive as the frame global `global`, then hand it to the
/// observer, if there is one. The child lives until its frame is removed.
pub(crate) fn publish_child<C>(
    frame: &BootstrappedFrame,
    global: &str,
    child: Arc<C>,
    observer: Option<&ChildReady<C>>,
) where
    C: Any + Send + Sync,
{
    frame.context().globals.expose(global, child.clone());
    if let Some(observer) = observer {
        observer(child);
    }
}
