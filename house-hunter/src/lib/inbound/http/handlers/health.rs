pub const LIVENESS_MESSAGE: &str = "House Hunter server is online";

pub async fn health() -> &'static str {
    LIVENESS_MESSAGE
}
