//! Example: Recognizing a captcha image.
//!
//! Run with: cargo run --example identify_image -- <image> [code_type] [--report]
//!
//! Credentials are read from CHAOJIYING_USER, CHAOJIYING_PASS (or
//! CHAOJIYING_PASS2) and CHAOJIYING_SOFT_ID.

use chaojiying::Chaojiying;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output (optional)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let image_path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: identify_image <image> [code_type] [--report]"))?;
    // 1902: common 4-6 character alphanumeric captcha
    let code_type: u32 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 1902,
    };
    let report = args.any(|arg| arg == "--report");

    let client = Chaojiying::new()?;

    let info = client.user_info().await?;
    println!(
        "Balance: {} points ({} locked)",
        info.point_balance, info.point_balance_locked
    );

    let image = std::fs::read(&image_path)?;
    match client.identify_image_bytes(code_type, 0, &image).await {
        Ok(result) => {
            println!("Success!");
            println!("  task_id: {}", result.task_id);
            println!("  text: {}", result.recognized_text);
            println!("  md5: {}", result.image_checksum);

            if report {
                client.report_error(&result.task_id).await?;
                println!("Reported task {} as wrong", result.task_id);
            }
        }
        Err(e) => {
            println!("Failed: {}", e);
        }
    }

    Ok(())
}
