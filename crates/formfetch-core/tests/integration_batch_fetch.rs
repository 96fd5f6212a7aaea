//! Integration test: batch fetch over real HTTP through the curl transport.
//!
//! Starts a local server with per-path responses, runs the fetcher against it,
//! and checks files on disk, console lines, and request order.

mod common;

use common::form_server::{self, Route};
use formfetch_core::fetcher::{BatchFetcher, FailureReason, FetchOptions, UrlOutcome};
use formfetch_core::report::Reporter;
use formfetch_core::summary;
use formfetch_core::transport::{CurlTransport, Fetch, HttpOptions, TransportErrorKind};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn console_lines(reporter: Reporter<Vec<u8>>) -> Vec<String> {
    String::from_utf8(reporter.into_inner())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn two_pdfs_saved_with_exact_bodies() {
    let server = form_server::start(vec![
        ("/x/a.pdf", Route::pdf(b"AAA")),
        ("/x/b.pdf", Route::pdf(b"BBB")),
    ]);
    let dir = tempdir().unwrap();
    let urls = vec![server.url("/x/a.pdf"), server.url("/x/b.pdf")];

    let transport = CurlTransport::new(&HttpOptions::default()).unwrap();
    let mut fetcher = BatchFetcher::new(transport, FetchOptions::new(dir.path()));
    let mut reporter = Reporter::new(Vec::new());
    let report = fetcher.run(&urls, &mut reporter);

    assert!(report.all_succeeded());
    assert_eq!(fs::read(dir.path().join("a.pdf")).unwrap(), b"AAA");
    assert_eq!(fs::read(dir.path().join("b.pdf")).unwrap(), b"BBB");
    let lines = console_lines(reporter);
    assert_eq!(
        lines,
        vec![
            format!("Downloading {}", urls[0]),
            "Saved a.pdf".to_string(),
            format!("Downloading {}", urls[1]),
            "Saved b.pdf".to_string(),
        ]
    );
}

#[test]
fn missing_form_is_reported_and_next_url_still_fetched() {
    let server = form_server::start(vec![("/x/b.pdf", Route::pdf(b"BBB"))]);
    let dir = tempdir().unwrap();
    let urls = vec![server.url("/x/a.pdf"), server.url("/x/b.pdf")];

    let transport = CurlTransport::new(&HttpOptions::default()).unwrap();
    let mut fetcher = BatchFetcher::new(transport, FetchOptions::new(dir.path()));
    let mut reporter = Reporter::new(Vec::new());
    let report = fetcher.run(&urls, &mut reporter);

    assert!(!dir.path().join("a.pdf").exists());
    assert!(matches!(
        report.outcomes[0],
        UrlOutcome::Failed {
            reason: FailureReason::Status(404),
            ..
        }
    ));
    assert!(report.outcomes[1].is_saved());
    assert_eq!(server.requested_paths(), vec!["/x/a.pdf", "/x/b.pdf"]);

    let lines = console_lines(reporter);
    assert!(lines[1].contains(&urls[0]));
    assert!(lines[1].starts_with("Failed to download"));
}

#[test]
fn redirect_is_followed_and_saved_under_requested_name() {
    let server = form_server::start(vec![
        ("/latest/RICH.pdf", Route::redirect("/archive/RICH3108form.pdf")),
        ("/archive/RICH3108form.pdf", Route::pdf(b"%PDF-1.4 rich")),
    ]);
    let dir = tempdir().unwrap();

    let mut transport = CurlTransport::new(&HttpOptions::default()).unwrap();
    let resp = transport.get(&server.url("/latest/RICH.pdf")).unwrap();
    assert_eq!(resp.status, 200);
    assert!(resp.is_pdf());

    let mut fetcher = BatchFetcher::new(transport, FetchOptions::new(dir.path()));
    let mut reporter = Reporter::new(Vec::new());
    let report = fetcher.run(&[server.url("/latest/RICH.pdf")], &mut reporter);

    assert!(report.all_succeeded());
    assert_eq!(
        fs::read(dir.path().join("RICH.pdf")).unwrap(),
        b"%PDF-1.4 rich"
    );
}

#[test]
fn require_pdf_skips_html_placeholder() {
    let server = form_server::start(vec![(
        "/x/a.pdf",
        Route::html(200, "<html>Form not yet available</html>"),
    )]);
    let dir = tempdir().unwrap();
    let mut options = FetchOptions::new(dir.path());
    options.require_pdf = true;

    let transport = CurlTransport::new(&HttpOptions::default()).unwrap();
    let mut fetcher = BatchFetcher::new(transport, options);
    let mut reporter = Reporter::new(Vec::new());
    let report = fetcher.run(&[server.url("/x/a.pdf")], &mut reporter);

    assert!(matches!(
        report.outcomes[0],
        UrlOutcome::Failed {
            reason: FailureReason::UnexpectedContentType(_),
            ..
        }
    ));
    assert!(!dir.path().join("a.pdf").exists());
}

#[test]
fn stalled_server_times_out_without_aborting_batch() {
    let server = form_server::start(vec![
        ("/slow.pdf", Route::pdf(b"late").delayed(Duration::from_secs(4))),
        ("/fast.pdf", Route::pdf(b"fast")),
    ]);
    let dir = tempdir().unwrap();
    let opts = HttpOptions {
        timeout: Duration::from_secs(1),
        ..HttpOptions::default()
    };

    let transport = CurlTransport::new(&opts).unwrap();
    let mut fetcher = BatchFetcher::new(transport, FetchOptions::new(dir.path()));
    let mut reporter = Reporter::new(Vec::new());
    let report = fetcher.run(
        &[server.url("/slow.pdf"), server.url("/fast.pdf")],
        &mut reporter,
    );

    match &report.outcomes[0] {
        UrlOutcome::Failed {
            reason: FailureReason::Transport(e),
            ..
        } => assert_eq!(e.kind, TransportErrorKind::Timeout),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert!(!dir.path().join("slow.pdf").exists());
    assert_eq!(fs::read(dir.path().join("fast.pdf")).unwrap(), b"fast");
}

#[test]
fn refused_connection_is_transport_failure() {
    // Bind then drop to get a port with nothing listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let dir = tempdir().unwrap();

    let transport = CurlTransport::new(&HttpOptions::default()).unwrap();
    let mut fetcher = BatchFetcher::new(transport, FetchOptions::new(dir.path()));
    let mut reporter = Reporter::new(Vec::new());
    let report = fetcher.run(
        &[format!("http://127.0.0.1:{}/a.pdf", port)],
        &mut reporter,
    );

    match &report.outcomes[0] {
        UrlOutcome::Failed {
            reason: FailureReason::Transport(e),
            ..
        } => assert_eq!(e.kind, TransportErrorKind::Connection),
        other => panic!("expected connection failure, got {:?}", other),
    }
}

#[test]
fn summary_lists_every_url_after_real_fetch() {
    let server = form_server::start(vec![
        ("/x/a.pdf", Route::pdf(b"%PDF-1.4 a")),
        ("/x/b.pdf", Route::html(200, "<html>placeholder</html>")),
    ]);
    let dir = tempdir().unwrap();
    let urls = vec![
        server.url("/x/a.pdf"),
        server.url("/x/b.pdf"),
        server.url("/x/c.pdf"),
    ];
    let mut options = FetchOptions::new(dir.path());
    options.require_pdf_magic = true;

    let transport = CurlTransport::new(&HttpOptions::default()).unwrap();
    let mut fetcher = BatchFetcher::new(transport, options);
    let mut reporter = Reporter::new(Vec::new());
    let report = fetcher.run(&urls, &mut reporter);

    let summary_path = dir.path().join(summary::SUMMARY_FILE_NAME);
    summary::write_summary(&summary_path, &report).unwrap();
    let text = fs::read_to_string(&summary_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "url,saved_as,status,bytes");
    assert_eq!(
        lines[1],
        format!("{},{},OK,10", urls[0], dir.path().join("a.pdf").display())
    );
    assert!(lines[2].ends_with(",ERROR_NOT_PDF,0"));
    assert!(lines[3].ends_with(",BAD_STATUS_404,0"));
    assert_eq!(lines.len(), 4);
    assert!(!dir.path().join("b.pdf").exists());
}
