//! Runtime handles and blocking entry points.

pub use tokio::runtime::{Builder, Handle, Runtime};

/// Run a future to completion on a fresh current-thread runtime.
///
/// Intended for host bindings that call into the core from a synchronous
/// thread. Must not be called from inside an existing runtime.
pub fn block_on<F>(future: F) -> std::io::Result<F::Output>
where
    F: std::future::Future,
{
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(future))
}

/// Returns `true` when the caller is running inside a tokio runtime.
pub fn in_runtime() -> bool {
    Handle::try_current().is_ok()
}
