use aimtrack::commands::Cli;
use aimtrack::libs::messages::macros::is_debug_mode;
use aimtrack::msg_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aimtrack=debug")))
            .with_target(false)
            .init();
    }

    if let Err(e) = Cli::menu().await {
        msg_error!(e);
        std::process::exit(1);
    }
}
