//! Tracing subscriber setup

use anyhow::Result;
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::LoggingConfig;

pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Build a fmt subscriber writing to `writer`
pub fn build_subscriber<W>(
    config: &LoggingConfig,
    writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(parse_level(&config.level))
        .with_writer(writer)
        .with_span_events(if config.log_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .finish()
}

/// Install the global subscriber. Logs go to stderr so stdout only carries
/// the JSON result.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    tracing::subscriber::set_global_default(build_subscriber(config, std::io::stderr))
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::reputation::VoteEngine;
    use crate::script::{LedgerCommand, VoteScript};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn debug_logging(log_spans: bool) -> LoggingConfig {
        LoggingConfig {
            level: "debug".to_string(),
            log_spans,
        }
    }

    fn replay_one_vote() {
        let script = VoteScript::new(vec![LedgerCommand::Upvote {
            target: "b".to_string(),
            sender: "a".to_string(),
        }]);
        script.run(&mut VoteEngine::new());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("bogus"), Level::INFO);
    }

    #[test]
    fn test_span_events_emitted_when_enabled() {
        let logs = CapturedLogs::default();
        let subscriber = build_subscriber(&debug_logging(true), logs.clone());

        tracing::subscriber::with_default(subscriber, replay_one_vote);

        let output = logs.contents();
        assert!(output.contains("vote_script"));
        assert!(output.contains("cast"));
        assert!(output.contains("time.busy"));
    }

    #[test]
    fn test_span_events_suppressed_by_default() {
        let logs = CapturedLogs::default();
        let subscriber = build_subscriber(&debug_logging(false), logs.clone());

        tracing::subscriber::with_default(subscriber, replay_one_vote);

        let output = logs.contents();
        assert!(output.contains("Applied vote"));
        assert!(!output.contains("time.busy"));
    }

    #[test]
    fn test_config_summary_logged_on_demand() {
        let logs = CapturedLogs::default();
        let subscriber = build_subscriber(&debug_logging(false), logs.clone());

        tracing::subscriber::with_default(subscriber, || {
            let config = LedgerConfig::from_lookup(|_| None).unwrap();
            assert!(!logs.contents().contains("Ledger configuration loaded"));

            config.log_summary();
        });

        assert!(logs.contents().contains("Ledger configuration loaded"));
    }
}
