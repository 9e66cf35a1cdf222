#[tokio::main]
async fn main() -> std::io::Result<()> {
    barbershop_backend::run().await
}
