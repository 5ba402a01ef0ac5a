use std::{fs, io, path::Path};

use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 날짜별 로그 파일을 최대 몇 개까지 남길지
const MAX_LOG_FILES: usize = 5;

/// Tracing guards를 보관하는 구조체
/// 이 구조체가 drop되기 전까지 로깅이 계속 작동합니다
pub struct TracingGuards {
    _file: WorkerGuard,
    _console: WorkerGuard,
}

/// Tracing 초기화
/// `log_file` 기준의 날짜별 파일 로깅과 stderr 콘솔 로깅을 설정합니다.
/// stdout은 CLI의 JSON 출력 전용으로 남겨 둡니다.
pub fn init_tracing(log_file: &Path) -> io::Result<TracingGuards> {
    // 1) 파일 appender
    let (file_writer, file_guard) = non_blocking(daily_file_appender(log_file)?);

    // 2) 콘솔도 non-blocking
    let (console_writer, console_guard) = non_blocking(io::stderr());

    // 3) RUST_LOG가 없으면 info
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 파일 로깅: INFO 레벨 이상만 기록
    let file_filter = EnvFilter::new("info");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_filter),
        )
        .with(fmt::layer().with_writer(console_writer).with_ansi(true))
        .init();

    Ok(TracingGuards {
        _file: file_guard,
        _console: console_guard,
    })
}

/// 날짜별 로그 파일 appender
/// `logs/bot.log`이면 `logs/bot.2025-11-29.log` 형식으로 파일을 만들고,
/// 오래된 파일은 `MAX_LOG_FILES`개만 남깁니다.
fn daily_file_appender(log_file: &Path) -> io::Result<RollingFileAppender> {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let prefix = log_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("bot");

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(MAX_LOG_FILES);
    if let Some(suffix) = log_file.extension().and_then(|s| s.to_str()) {
        builder = builder.filename_suffix(suffix);
    }

    builder
        .build(dir)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn log_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_daily_appender_creates_dated_file_in_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested");

        let mut appender = daily_file_appender(&log_dir.join("bot.log")).unwrap();
        writeln!(appender, "first").unwrap();
        writeln!(appender, "second").unwrap();
        appender.flush().unwrap();

        let names = log_files(&log_dir);
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("bot."), "{}", names[0]);
        assert!(names[0].ends_with(".log"), "{}", names[0]);

        let content = fs::read_to_string(log_dir.join(&names[0])).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_daily_appender_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gateway.log");

        for line in ["one", "two"] {
            let mut appender = daily_file_appender(&path).unwrap();
            writeln!(appender, "{}", line).unwrap();
            appender.flush().unwrap();
        }

        let names = log_files(dir.path());
        assert_eq!(names.len(), 1);
        let content = fs::read_to_string(dir.path().join(&names[0])).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }
}
