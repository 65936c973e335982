use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Директивы по умолчанию: уровень для своих крейтов, шум `reqwest`/`hyper`
/// приглушён до `warn`.
fn default_directives(level: &str) -> String {
    format!("consult_cli={level},consult_client={level},reqwest=warn,hyper=warn")
}

/// Подключает подписчика `tracing`.
///
/// `RUST_LOG` важнее `level`. Вывод идёт в stderr: stdout занят страницами
/// и таблицами, которые пользователь может перенаправить в файл.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(level)))
        .map_err(|e| anyhow!("invalid log level {level:?}: {e}"))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}
