use colored::Colorize;
use vaultdrop_cloud::{CloudBackend, Deadline};

pub async fn handle(
    backend: &dyn CloudBackend,
    manifest: &str,
    deadline: Deadline,
) -> anyhow::Result<()> {
    println!(
        "{}",
        format!("Bootstrapping {}...", backend.display_name()).blue()
    );
    println!("Manifest: {}", manifest.cyan());
    println!();

    let report = backend.bootstrap(manifest, deadline).await?;

    for outcome in &report.outcomes {
        if outcome.success {
            let stack_id = outcome.stack_id.as_deref().unwrap_or("-");
            println!("  {} {} ({})", "✓".green(), outcome.stack_name.cyan(), stack_id);
        } else {
            let error = outcome.error.as_deref().unwrap_or("unknown error");
            println!("  {} {}: {}", "✗".red(), outcome.stack_name.cyan(), error);
        }
    }

    println!();
    println!("{}", report.to_string().bold());
    println!("Stacks are created asynchronously; watch their progress in the provider console.");

    if !report.is_success() {
        anyhow::bail!("{} provisioning request(s) failed", report.failed());
    }
    Ok(())
}
