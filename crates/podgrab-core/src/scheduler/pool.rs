//! Bounded worker pool over the shuffled job list.
//!
//! Keeps up to `max_concurrent` transfers in flight; workers draw from a
//! static pre-shuffled queue, so completion order is not input order. All
//! progress accounting happens at the single join point after each
//! completion; workers never touch shared state.

use tokio::task::JoinSet;

use crate::download::{self, DownloadError};

use super::jobs::Job;

/// Outcome counts for one pool run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub ok: usize,
    pub failed: usize,
}

/// Drain `jobs` with at most `max_concurrent` downloads in flight.
///
/// A failed job is reported on stderr and does not block or cancel its
/// siblings; its URL stays recorded in history regardless (a failed download
/// is not retried on a later run unless the operator clears history). After
/// each completion a `completed / total` progress line is printed.
pub async fn run_downloads(
    client: &reqwest::Client,
    jobs: Vec<Job>,
    max_concurrent: usize,
) -> DownloadReport {
    let max_concurrent = max_concurrent.max(1);
    let total = jobs.len();
    let mut queue = jobs.into_iter();
    let mut join_set: JoinSet<(Job, Result<std::path::PathBuf, DownloadError>)> = JoinSet::new();
    let mut report = DownloadReport::default();
    let mut completed = 0usize;

    loop {
        while join_set.len() < max_concurrent {
            let Some(job) = queue.next() else {
                break;
            };
            let client = client.clone();
            join_set.spawn(async move {
                let outcome = download::download(&client, &job.url, &job.dest_dir).await;
                (job, outcome)
            });
        }

        if join_set.is_empty() {
            break;
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };
        completed += 1;
        match joined {
            Ok((_, Ok(_))) => report.ok += 1,
            Ok((job, Err(e))) => {
                report.failed += 1;
                eprintln!("download failed: {}: {}", job.url, e);
            }
            Err(e) => {
                report.failed += 1;
                eprintln!("download task failed: {}", e);
            }
        }
        println!("{} / {} downloads finished", completed, total);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::path::PathBuf;

    // One-shot HTTP server: answers every request with `status` and `body`.
    fn serve(status: &'static str, body: &'static [u8], requests: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        std::thread::spawn(move || {
            for stream in listener.incoming().flatten().take(requests) {
                let mut stream = stream;
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.write_all(body);
            }
        });
        format!("http://127.0.0.1:{}/", port)
    }

    fn jobs_for(base: &str, dir: &std::path::Path, names: &[&str]) -> Vec<Job> {
        names
            .iter()
            .map(|n| Job {
                url: format!("{}{}", base, n),
                dest_dir: PathBuf::from(dir),
            })
            .collect()
    }

    #[tokio::test]
    async fn empty_job_list_is_a_noop() {
        let client = reqwest::Client::new();
        let report = run_downloads(&client, Vec::new(), 4).await;
        assert_eq!(report, DownloadReport::default());
    }

    #[tokio::test]
    async fn pool_downloads_all_jobs() {
        let base = serve("200 OK", b"audio-bytes", 3);
        let dir = tempfile::tempdir().unwrap();
        let jobs = jobs_for(&base, dir.path(), &["a.mp3", "b.mp3", "c.mp3"]);
        let client = reqwest::Client::new();

        let report = run_downloads(&client, jobs, 2).await;
        assert_eq!(report, DownloadReport { ok: 3, failed: 0 });
        for name in ["a.mp3", "b.mp3", "c.mp3"] {
            assert_eq!(
                std::fs::read(dir.path().join(name)).unwrap(),
                b"audio-bytes"
            );
        }
    }

    #[tokio::test]
    async fn failed_job_does_not_cancel_siblings() {
        let ok_base = serve("200 OK", b"x", 2);
        let err_base = serve("404 Not Found", b"", 1);
        let dir = tempfile::tempdir().unwrap();
        let mut jobs = jobs_for(&ok_base, dir.path(), &["a.mp3", "b.mp3"]);
        jobs.push(Job {
            url: format!("{}missing.mp3", err_base),
            dest_dir: dir.path().to_path_buf(),
        });
        let client = reqwest::Client::new();

        let report = run_downloads(&client, jobs, 3).await;
        assert_eq!(report, DownloadReport { ok: 2, failed: 1 });
        assert!(dir.path().join("a.mp3").exists());
        assert!(dir.path().join("b.mp3").exists());
        assert!(!dir.path().join("missing.mp3").exists());
    }

    #[tokio::test]
    async fn concurrency_cap_of_zero_is_clamped() {
        let base = serve("200 OK", b"x", 1);
        let dir = tempfile::tempdir().unwrap();
        let jobs = jobs_for(&base, dir.path(), &["one.mp3"]);
        let client = reqwest::Client::new();

        let report = run_downloads(&client, jobs, 0).await;
        assert_eq!(report, DownloadReport { ok: 1, failed: 0 });
    }
}
