use crate::sse::models::SseSender;
use tokio::sync::broadcast;

pub fn create_sse_broadcaster() -> SseSender {
    let (tx, _rx) = broadcast::channel(100);
    tx
}
