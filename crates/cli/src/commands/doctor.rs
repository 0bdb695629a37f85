use serde::Serialize;

use shopmate_core::{AppConfig, LoadOptions};
use shopmate_db::DemoSeedDataset;

use super::CommandResult;

#[derive(Serialize)]
struct DoctorCheck {
    name: &'static str,
    passed: bool,
    detail: String,
}

#[derive(Serialize)]
struct DoctorReport {
    checks: Vec<DoctorCheck>,
    healthy: bool,
}

pub async fn run(json: bool) -> CommandResult {
    let mut checks = Vec::new();

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config",
                passed: true,
                detail: format!("database url `{}`", config.database.url),
            });
            Some(config)
        }
        Err(error) => {
            checks.push(DoctorCheck { name: "config", passed: false, detail: error.to_string() });
            None
        }
    };

    if let Some(config) = config {
        match shopmate_db::connect(&config.database).await {
            Ok(pool) => {
                checks.push(DoctorCheck {
                    name: "database",
                    passed: true,
                    detail: "connection established".to_owned(),
                });

                match shopmate_db::migrations::run_pending(&pool).await {
                    Ok(()) => checks.push(DoctorCheck {
                        name: "migrations",
                        passed: true,
                        detail: "schema up to date".to_owned(),
                    }),
                    Err(error) => checks.push(DoctorCheck {
                        name: "migrations",
                        passed: false,
                        detail: error.to_string(),
                    }),
                }

                match DemoSeedDataset::verify(&pool).await {
                    Ok(verification) => {
                        let failed: Vec<String> = verification
                            .checks
                            .iter()
                            .filter(|check| !check.passed)
                            .map(|check| check.name.clone())
                            .collect();
                        checks.push(DoctorCheck {
                            name: "seed",
                            passed: verification.passed(),
                            detail: if failed.is_empty() {
                                "demo dataset present".to_owned()
                            } else {
                                format!("missing: {}", failed.join(", "))
                            },
                        });
                    }
                    Err(error) => checks.push(DoctorCheck {
                        name: "seed",
                        passed: false,
                        detail: error.to_string(),
                    }),
                }
            }
            Err(error) => {
                checks.push(DoctorCheck {
                    name: "database",
                    passed: false,
                    detail: error.to_string(),
                });
            }
        }
    }

    let healthy = checks.iter().all(|check| check.passed);
    let report = DoctorReport { checks, healthy };

    let output = if json {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| error.to_string())
    } else {
        let mut lines = Vec::new();
        for check in &report.checks {
            let marker = if check.passed { "ok" } else { "FAIL" };
            lines.push(format!("[{marker}] {}: {}", check.name, check.detail));
        }
        lines.push(if report.healthy {
            "all checks passed".to_owned()
        } else {
            "one or more checks failed".to_owned()
        });
        lines.join("\n")
    };

    CommandResult { exit_code: if report.healthy { 0 } else { 1 }, output }
}
