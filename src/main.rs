use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    mc_quick_lib::run().await
}
