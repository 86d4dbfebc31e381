//! Print-to-PDF helper.
//!
//! Each print request gets its own hidden window + webview scoped to the
//! job. Lifecycle, terminal on first success or first unrecoverable failure:
//!
//! 1. validate the job (exactly one content source)
//! 2. load the content into a hidden webview
//! 3. once loaded, capture the view as a PDF buffer
//! 4. write the buffer to the destination, creating missing parent
//!    directories and retrying the write exactly once
//!
//! Failures are logged; the requester never receives an explicit signal
//! either way. The hidden window is dropped when the job leaves the capture
//! stage, on success and on every error path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use anyhow::{Context, Result};
use tao::event_loop::EventLoopWindowTarget;
use tao::window::{Window, WindowBuilder};
use tracing::{debug, error, info};
use wry::{PageLoadEvent, WebView};

use crate::error::ShellError;
use crate::protocol::PrintJob;
use crate::window::new_webview_builder;

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(1);

/// The single content source of a validated print job.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintSource {
    Html(String),
    File(PathBuf),
}

/// Validate a print job: exactly one of `html`/`src` must be present.
pub fn validate(job: &PrintJob) -> crate::error::Result<PrintSource> {
    match (&job.html, &job.src) {
        (Some(_), Some(_)) => Err(ShellError::PrintJobAmbiguous),
        (Some(html), None) => Ok(PrintSource::Html(html.clone())),
        (None, Some(src)) => Ok(PrintSource::File(src.clone())),
        (None, None) => Err(ShellError::PrintJobEmpty),
    }
}

/// An in-flight print job: the hidden window, its webview, and where the
/// PDF goes. Dropping the value disposes the window.
pub struct ActiveJob {
    pub id: u64,
    dst: PathBuf,
    window: Window,
    webview: WebView,
}

/// Start a print job: validate it and spin up the hidden render window.
///
/// `on_loaded` fires (from the webview) once the content finished loading;
/// the caller is expected to route it back to the event loop and then call
/// [`complete`] with the job. Returns the job to keep in the caller's
/// registry, or an error if validation or window construction failed (in
/// which case nothing was created, or what was created is dropped here).
pub fn start<T: 'static>(
    job: PrintJob,
    target: &EventLoopWindowTarget<T>,
    on_loaded: impl Fn(u64) + 'static,
) -> Result<ActiveJob> {
    let source = validate(&job)?;
    let id = NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed);

    debug!(job_id = id, dst = %job.dst.display(), "Starting print job");

    let window = WindowBuilder::new()
        .with_title("Inkpad Print")
        .with_visible(false)
        .build(target)
        .context("create hidden print window")?;

    let builder = new_webview_builder(&window).with_on_page_load_handler(move |event, _url| {
        if matches!(event, PageLoadEvent::Finished) {
            on_loaded(id);
        }
    });

    let builder = match source {
        PrintSource::Html(html) => builder.with_html(html),
        PrintSource::File(path) => builder.with_url(format!("file://{}", path.display())),
    };

    let webview = builder.build().context("create hidden print webview")?;

    Ok(ActiveJob {
        id,
        dst: job.dst,
        window,
        webview,
    })
}

/// Finish a loaded job: capture the PDF, dispose the hidden window, then
/// persist on a worker thread. All failures are logged and terminal.
pub fn complete(job: ActiveJob) {
    let ActiveJob {
        id,
        dst,
        window,
        webview,
    } = job;

    let captured = capture(&webview);

    // The hidden window is scoped to the job; release it before the write so
    // no handle leaks regardless of how persistence goes.
    drop(webview);
    drop(window);

    let data = match captured {
        Ok(data) => data,
        Err(e) => {
            error!(job_id = id, error = %e, "PDF capture failed");
            return;
        }
    };

    thread::spawn(move || match persist(&dst, &data) {
        Ok(()) => info!(job_id = id, dst = %dst.display(), "PDF written"),
        Err(e) => error!(job_id = id, dst = %dst.display(), error = %e, "PDF write failed"),
    });
}

/// Render the webview's current content to a PDF buffer.
///
/// macOS snapshots the WKWebView via `dataWithPDFInsideRect:`; no other
/// platform exposes a render-to-PDF capability through wry.
#[cfg(target_os = "macos")]
fn capture(webview: &WebView) -> crate::error::Result<Vec<u8>> {
    use cocoa::base::{id, nil};
    use cocoa::foundation::NSRect;
    use objc::{msg_send, sel, sel_impl};
    use wry::WebViewExtMacOS;

    unsafe {
        let wk: id = webview.webview();
        if wk == nil {
            return Err(ShellError::PdfCapture("no native webview handle".into()));
        }

        let bounds: NSRect = msg_send![wk, bounds];
        let data: id = msg_send![wk, dataWithPDFInsideRect: bounds];
        if data == nil {
            return Err(ShellError::PdfCapture(
                "dataWithPDFInsideRect: returned nil".into(),
            ));
        }

        let len: usize = msg_send![data, length];
        let ptr: *const u8 = msg_send![data, bytes];
        if ptr.is_null() || len == 0 {
            return Err(ShellError::PdfCapture("empty PDF data".into()));
        }

        Ok(std::slice::from_raw_parts(ptr, len).to_vec())
    }
}

#[cfg(not(target_os = "macos"))]
fn capture(_webview: &WebView) -> crate::error::Result<Vec<u8>> {
    Err(ShellError::UnsupportedPlatform)
}

/// Write the PDF buffer to `dst`.
///
/// A `NotFound` failure means an intermediate directory is missing: create
/// the full parent path and retry the write exactly once. Any other failure,
/// or a failure after the retry, is final.
pub fn persist(dst: &Path, data: &[u8]) -> io::Result<()> {
    persist_with(dst, |p| fs::write(p, data), |p| fs::create_dir_all(p))
}

fn persist_with<W, M>(dst: &Path, mut write: W, mut create_dirs: M) -> io::Result<()>
where
    W: FnMut(&Path) -> io::Result<()>,
    M: FnMut(&Path) -> io::Result<()>,
{
    match write(dst) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let Some(parent) = dst.parent() else {
                return Err(e);
            };
            create_dirs(parent)?;
            write(dst)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PrintJob;
    use std::cell::Cell;

    fn job(html: Option<&str>, src: Option<&str>) -> PrintJob {
        PrintJob {
            html: html.map(String::from),
            src: src.map(PathBuf::from),
            dst: PathBuf::from("/tmp/out.pdf"),
        }
    }

    #[test]
    fn job_with_html_is_valid() {
        assert_eq!(
            validate(&job(Some("<p>x</p>"), None)).unwrap(),
            PrintSource::Html("<p>x</p>".into())
        );
    }

    #[test]
    fn job_with_src_is_valid() {
        assert_eq!(
            validate(&job(None, Some("/notes/a.html"))).unwrap(),
            PrintSource::File(PathBuf::from("/notes/a.html"))
        );
    }

    #[test]
    fn job_without_content_is_rejected() {
        assert!(matches!(
            validate(&job(None, None)),
            Err(ShellError::PrintJobEmpty)
        ));
    }

    #[test]
    fn job_with_both_sources_is_rejected() {
        assert!(matches!(
            validate(&job(Some("<p>x</p>"), Some("/a.html"))),
            Err(ShellError::PrintJobAmbiguous)
        ));
    }

    #[test]
    fn persist_writes_through_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("exports").join("deep").join("note.pdf");

        persist(&dst, b"%PDF-1.4 test").unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"%PDF-1.4 test");
    }

    #[test]
    fn persist_plain_write_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("note.pdf");
        persist(&dst, b"%PDF").unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"%PDF");
    }

    #[test]
    fn missing_directory_costs_exactly_two_write_attempts() {
        let writes = Cell::new(0);
        let mkdirs = Cell::new(0);

        let result = persist_with(
            Path::new("/x/y/z.pdf"),
            |_p| {
                writes.set(writes.get() + 1);
                if writes.get() == 1 {
                    Err(io::Error::new(io::ErrorKind::NotFound, "missing dir"))
                } else {
                    Ok(())
                }
            },
            |_d| {
                mkdirs.set(mkdirs.get() + 1);
                Ok(())
            },
        );

        assert!(result.is_ok());
        assert_eq!(writes.get(), 2);
        assert_eq!(mkdirs.get(), 1);
    }

    #[test]
    fn second_write_failure_is_final() {
        let writes = Cell::new(0);
        let result = persist_with(
            Path::new("/x/y/z.pdf"),
            |_p| {
                writes.set(writes.get() + 1);
                Err(io::Error::new(io::ErrorKind::NotFound, "still missing"))
            },
            |_d| Ok(()),
        );

        assert!(result.is_err());
        assert_eq!(writes.get(), 2);
    }

    #[test]
    fn non_notfound_errors_are_not_retried() {
        let writes = Cell::new(0);
        let result = persist_with(
            Path::new("/x/y/z.pdf"),
            |_p| {
                writes.set(writes.get() + 1);
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope"))
            },
            |_d| panic!("must not create directories for non-NotFound errors"),
        );

        assert!(result.is_err());
        assert_eq!(writes.get(), 1);
    }

    #[test]
    fn mkdir_failure_aborts_without_second_write() {
        let writes = Cell::new(0);
        let result = persist_with(
            Path::new("/x/y/z.pdf"),
            |_p| {
                writes.set(writes.get() + 1);
                Err(io::Error::new(io::ErrorKind::NotFound, "missing dir"))
            },
            |_d| Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")),
        );

        assert!(result.is_err());
        assert_eq!(writes.get(), 1);
    }
}
