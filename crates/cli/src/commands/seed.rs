use shopmate_db::DemoSeedDataset;

use super::CommandResult;

pub async fn run() -> CommandResult {
    let (_, pool) = match super::open_store().await {
        Ok(opened) => opened,
        Err(error) => return CommandResult::failed(error),
    };

    if let Err(error) = DemoSeedDataset::load(&pool).await {
        return CommandResult::failed(format!("seed load failed: {error}"));
    }

    match DemoSeedDataset::verify(&pool).await {
        Ok(verification) if verification.passed() => {
            CommandResult::ok(format!("seeded {} checks passed", verification.checks.len()))
        }
        Ok(verification) => {
            let mut lines = vec!["seed verification failed:".to_owned()];
            for check in verification.checks.iter().filter(|check| !check.passed) {
                lines.push(format!("  {} ({})", check.name, check.detail));
            }
            CommandResult::failed(lines.join("\n"))
        }
        Err(error) => CommandResult::failed(format!("seed verification error: {error}")),
    }
}
