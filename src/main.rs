use wordle_smoke::{SmokeConfig, SmokeError, SmokeTest};

#[tokio::main]
async fn main() -> Result<(), SmokeError> {
    env_logger::init();
    let report = SmokeTest::new(SmokeConfig::default()).run().await?;
    log::info!(
        "finished at {} with {} screenshot(s)",
        report.reached(),
        report.screenshots().len()
    );
    Ok(())
}
