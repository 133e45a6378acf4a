#[tokio::main]
async fn main() {
    if let Err(e) = ejona_site::run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
