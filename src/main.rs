#[tokio::main]
async fn main() {
    turf_backend::run().await;
}
