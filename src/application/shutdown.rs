use std::future::Future;

use tracing::{error, info};

use crate::{
    error::PubSubResult,
    pubsub::InterruptTrigger,
};

/// Завершается по Ctrl+C.
///
/// Если обработчик сигнала установить не удалось, future никогда не
/// завершится: процесс можно будет остановить только принудительно.
pub async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupt signal received"),
        Err(e) => {
            error!(error = %e, "failed to listen for interrupt signal");
            std::future::pending::<()>().await
        }
    }
}

/// Запускает блокирующий цикл `worker` в отдельном потоке и ждёт либо его
/// завершения, либо `shutdown`.
///
/// При `shutdown` будит рабочий поток через `trigger` и дожидается, пока
/// он сам закроет свой сокет и вернёт результат.
pub(crate) async fn drive<T, W, F>(
    trigger: InterruptTrigger,
    worker: W,
    shutdown: F,
) -> PubSubResult<T>
where
    W: FnOnce() -> PubSubResult<T> + Send + 'static,
    T: Send + 'static,
    F: Future<Output = ()>,
{
    let mut handle = tokio::task::spawn_blocking(worker);

    tokio::select! {
        joined = &mut handle => return joined?,
        _ = shutdown => {
            info!("stopping worker");
            trigger.fire()?;
        }
    }

    handle.await?
}
