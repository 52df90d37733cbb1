use chrono::Local;
use std::path::PathBuf;
use std::sync::Once;

pub const LOG_LEVEL_ENV: &str = "BIC_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "BIC_LOG_DIR";

static INIT: Once = Once::new();

pub fn init_logging(app_name: &str) -> Result<(), String> {
    let mut init_result: Result<(), String> = Ok(());
    INIT.call_once(|| {
        if let Err(err) = init_logging_inner(app_name) {
            init_result = Err(err);
        }
    });
    init_result
}

fn init_logging_inner(app_name: &str) -> Result<(), String> {
    let level = resolve_level(
        std::env::var(LOG_LEVEL_ENV)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .as_deref(),
    );
    let log_dir = resolve_log_dir(std::env::var(LOG_DIR_ENV).ok().as_deref());

    let mut dispatch = fern::Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} | {:<5} | {} | {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stdout());

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let date = Local::now().format("%Y_%m_%d");
        let file_path = dir.join(format!("{app_name}-{date}.log"));
        dispatch = dispatch.chain(fern::log_file(file_path).map_err(|err| err.to_string())?);
    }

    dispatch.apply().map_err(|err| err.to_string())
}

fn resolve_level(value: Option<&str>) -> log::LevelFilter {
    value
        .and_then(|level| level.trim().parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info)
}

fn resolve_log_dir(value: Option<&str>) -> Option<PathBuf> {
    match value {
        Some("off") | Some("none") | Some("") => None,
        Some(path) => Some(PathBuf::from(path)),
        None => Some(PathBuf::from("logs")),
    }
}
