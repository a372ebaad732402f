#[tokio::main]
async fn main() {
    penalties::start_server().await;
}
