//! One-shot inventory example

use rfpad::{DeviceSelector, Reader};

#[tokio::main]
async fn main() -> rfpad::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Change to your pad's vid:pid
    let selector: DeviceSelector = std::env::var("RFPAD_DEVICE")
        .unwrap_or_else(|_| "0ab1:0002".to_string())
        .parse()?;

    println!("Opening reader {}...", selector);

    let mut reader = Reader::new(selector);
    reader.open().await?;
    println!("✓ Reader open");

    let tags = reader.inventory().await?;
    println!("✓ {} tag(s) in range", tags.len());
    for tag in &tags {
        println!("  {}", tag);
    }

    reader.close().await?;
    println!("✓ Released");

    Ok(())
}
