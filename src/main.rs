#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ics_generator::run().await
}
