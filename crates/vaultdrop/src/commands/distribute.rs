use colored::Colorize;
use std::path::Path;
use vaultdrop_cloud::{CloudBackend, Deadline};

pub async fn handle(
    backend: &dyn CloudBackend,
    file: &Path,
    deadline: Deadline,
) -> anyhow::Result<()> {
    println!(
        "{}",
        format!("Distributing through {}...", backend.display_name()).blue()
    );

    let object = backend.distribute(file, deadline).await?;

    println!("  {} {} ({})", "✓".green(), object.key.cyan(), object.uid);
    println!();
    println!("Access your file at: {}", object.url.green().bold());
    Ok(())
}
