use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    /// 一行一個 JSON 物件，給嵌入此函式庫的應用程式收集用
    Json,
}

/// `RUST_LOG` 優先；否則 verbose 時開到 debug，平常只顯示警告
pub fn env_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "place_journal=debug,info"
    } else {
        "place_journal=warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

fn fmt_layer<W>(format: LogFormat, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

pub fn build_subscriber<W>(
    format: LogFormat,
    verbose: bool,
    writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer(format, writer))
        .with(env_filter(verbose))
}

/// 寫到 stderr，stdout 留給指令輸出
pub fn init_logger(format: LogFormat, verbose: bool) {
    build_subscriber(format, verbose, std::io::stderr).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(format: LogFormat, verbose: bool, emit: impl FnOnce()) -> String {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = build_subscriber(format, verbose, move || writer.clone());
        tracing::subscriber::with_default(subscriber, emit);
        buffer.contents()
    }

    #[test]
    fn test_json_format_writes_one_object_per_event() {
        let output = capture(LogFormat::Json, true, || {
            tracing::warn!(places = 3, "loaded places");
        });

        let line: serde_json::Value =
            serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(line["level"], "WARN");
        assert_eq!(line["fields"]["message"], "loaded places");
        assert_eq!(line["fields"]["places"], 3);
    }

    #[test]
    fn test_compact_format_is_plain_text() {
        let output = capture(LogFormat::Compact, true, || {
            tracing::warn!("saved places");
        });

        assert!(output.contains("saved places"));
        assert!(serde_json::from_str::<serde_json::Value>(output.trim()).is_err());
    }
}
