use basics_dataset::{cli, create_dataset};
use std::time::Instant;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let spec = cli::parse_spec_from(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let start = Instant::now();
    let summary = create_dataset(&spec).await?;
    log::debug!(
        "elapsed={:.3}s header={}",
        start.elapsed().as_secs_f64(),
        summary.wrote_header
    );
    Ok(())
}
