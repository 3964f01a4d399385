#[tokio::main]
async fn main() -> anyhow::Result<()> {
    elevator_server::run().await
}
