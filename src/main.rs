/*
 * Responsibility
 * - tokio runtime startup
 * - calls app::run() (no logic lives here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    bearer_gate::app::run().await
}
