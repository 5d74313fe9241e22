//! Ping command implementation.

use crate::display::{Format, print_json};
use anyhow::{Context, Result};
use gecko_lib::prelude::*;

/// Check that the API answers.
pub(crate) async fn ping(client: &GeckoClient, format: Format) -> Result<()> {
    let pong = client.ping().await.context("Ping failed")?;
    match format {
        Format::Json => print_json(&pong),
        Format::Table => {
            println!("{}", pong.gecko_says);
            Ok(())
        }
    }
}
