use tokio::task::JoinHandle;

#[derive(Default)]
pub struct BackgroundTasks {
    pub heartbeat: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Abort and wait for every task so their captured state is dropped
    pub async fn abort_all(&mut self) {
        if let Some(handle) = self.heartbeat.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}
