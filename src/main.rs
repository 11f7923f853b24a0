#[tokio::main]
async fn main() {
    let code = pixel_priority::app::startup::startup().await;
    std::process::exit(code);
}
