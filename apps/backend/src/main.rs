#[tokio::main]
async fn main() -> anyhow::Result<()> {
    learn_backend::run().await
}
