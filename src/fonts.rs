//! Font candidates and the asynchronous availability probe.
//!
//! Cycling the font preference only settles on a candidate the system can
//! actually render. The probe consults the system font database off-thread
//! and reports back over a channel the event loop polls, so a slow font
//! scan never stalls input handling. `monospace` is the universal fallback
//! and always probes as available.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use once_cell::sync::Lazy;

/// The ordered font cycle. Order defines the cycle sequence; the last entry
/// is the fallback guaranteed usable everywhere.
pub const FONTS: &[&str] = &[
    "Source Code Pro",
    "Cascadia Code",
    "Fira Code",
    "JetBrains Mono",
    "Consolas",
    "monospace",
];

/// The candidate that terminates a font cycle unconditionally.
pub const FALLBACK_FONT: &str = "monospace";

/// Result of one availability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub family: String,
    pub available: bool,
}

/// Asynchronous font availability queries.
///
/// `request` must not block; results surface later through `poll`. One
/// outcome is produced per request, in request order.
pub trait FontProbe {
    fn request(&mut self, family: &str);
    fn poll(&mut self) -> Option<ProbeOutcome>;
}

/// System font database, loaded once on first probe.
static FONT_DB: Lazy<fontdb::Database> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system font database");
    db
});

/// Whether a family resolves in the system font database.
fn family_available(family: &str) -> bool {
    if family == FALLBACK_FONT {
        return true;
    }
    let query = fontdb::Query {
        families: &[fontdb::Family::Name(family)],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    FONT_DB.query(&query).is_some()
}

/// Probe backed by a worker thread querying the system font database.
pub struct SystemFontProbe {
    jobs: Sender<String>,
    results: Receiver<ProbeOutcome>,
}

impl SystemFontProbe {
    /// Start the probe worker.
    pub fn spawn() -> Self {
        let (job_tx, job_rx) = mpsc::channel::<String>();
        let (result_tx, result_rx) = mpsc::channel();
        thread::spawn(move || {
            for family in job_rx {
                let available = family_available(&family);
                if result_tx.send(ProbeOutcome { family, available }).is_err() {
                    break;
                }
            }
        });
        Self {
            jobs: job_tx,
            results: result_rx,
        }
    }
}

impl FontProbe for SystemFontProbe {
    fn request(&mut self, family: &str) {
        if self.jobs.send(family.to_string()).is_err() {
            tracing::warn!(family, "font probe worker is gone; request dropped");
        }
    }

    fn poll(&mut self) -> Option<ProbeOutcome> {
        self.results.try_recv().ok()
    }
}
