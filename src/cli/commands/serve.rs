//! Web server command.

use console::style;

use crate::config::{display_address, parse_bind_address, Settings};

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind);

    if !settings.llm.has_api_key() {
        eprintln!(
            "  {} OPENAI_API_KEY is not set; comparisons will fail until it is",
            style("!").yellow()
        );
    }

    println!(
        "{} Starting doccompare at http://{}",
        style("→").cyan(),
        display_address(&host, port)
    );
    println!("  Model: {}", settings.llm.model);
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}
