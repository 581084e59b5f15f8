use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use crate::errors::CompletionError;
use crate::provider::{CompletionClient, DynClient};

/// `RUST_LOG` wins; otherwise `debug` with `--debug`, else `warn`.
pub fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

pub fn session_dir(root: &Path, session: Uuid) -> PathBuf {
    root.join(session.to_string())
}

#[derive(Serialize)]
struct RequestRecord<'a> {
    timestamp: DateTime<Utc>,
    system: Option<&'a str>,
    user: &'a str,
    temperature: f32,
}

#[derive(Serialize)]
struct ResponseRecord<'a> {
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Wraps a client and writes every prompt and raw reply of a session to
/// `<dir>/<session>/NN.request.json` and `NN.response.json`.
///
/// Transcript writes are best-effort; a failing write never fails the call.
pub struct RecordingClient {
    inner: DynClient,
    dir: PathBuf,
    seq: AtomicUsize,
}

impl RecordingClient {
    pub fn new(inner: DynClient, root: &Path, session: Uuid) -> Self {
        Self { inner, dir: session_dir(root, session), seq: AtomicUsize::new(0) }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn save<T: Serialize>(&self, stage: &str, record: &T) {
        let path = self.dir.join(format!("{stage}.json"));
        if let Err(e) = write_json(&self.dir, &path, record) {
            warn!(path = %path.display(), error = %e, "could not write transcript");
        }
    }
}

fn write_json<T: Serialize>(dir: &Path, path: &Path, record: &T) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(path, to_string_pretty(record)?)?;
    Ok(())
}

#[async_trait]
impl CompletionClient for RecordingClient {
    async fn complete(
        &self,
        system: Option<&str>,
        user: &str,
        temperature: f32,
    ) -> Result<String, CompletionError> {
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.save(
            &format!("{n:02}.request"),
            &RequestRecord { timestamp: Utc::now(), system, user, temperature },
        );

        let result = self.inner.complete(system, user, temperature).await;
        let record = match &result {
            Ok(text) => ResponseRecord { timestamp: Utc::now(), content: Some(text.as_str()), error: None },
            Err(e) => ResponseRecord { timestamp: Utc::now(), content: None, error: Some(e.to_string()) },
        };
        self.save(&format!("{n:02}.response"), &record);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::ScriptedClient;
    use serde_json::Value;

    #[tokio::test]
    async fn records_each_call_in_sequence() {
        let tmp = tempfile::tempdir().unwrap();
        let session = Uuid::new_v4();
        let inner = ScriptedClient::replying("first").then_err(CompletionError::EmptyResponse);
        let rec = RecordingClient::new(Box::new(inner), tmp.path(), session);

        assert_eq!(rec.complete(Some("sys"), "hello", 0.3).await.unwrap(), "first");
        assert!(rec.complete(None, "again", 0.7).await.is_err());

        let dir = tmp.path().join(session.to_string());
        assert_eq!(rec.dir(), dir.as_path());

        let req: Value = serde_json::from_str(&fs::read_to_string(dir.join("01.request.json")).unwrap()).unwrap();
        assert_eq!(req["system"], "sys");
        assert_eq!(req["user"], "hello");

        let resp: Value = serde_json::from_str(&fs::read_to_string(dir.join("01.response.json")).unwrap()).unwrap();
        assert_eq!(resp["content"], "first");
        assert!(resp.get("error").is_none());

        let resp: Value = serde_json::from_str(&fs::read_to_string(dir.join("02.response.json")).unwrap()).unwrap();
        assert_eq!(resp["error"], "endpoint returned no text");
        let req: Value = serde_json::from_str(&fs::read_to_string(dir.join("02.request.json")).unwrap()).unwrap();
        assert!(req["system"].is_null());
    }

    #[tokio::test]
    async fn unwritable_dir_does_not_fail_the_call() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "not a dir").unwrap();
        let rec = RecordingClient::new(Box::new(ScriptedClient::replying("ok")), &blocker, Uuid::new_v4());
        assert_eq!(rec.complete(None, "x", 0.7).await.unwrap(), "ok");
    }
}
