//! Water sampling: Niskin captures, bottles and sampling sessions.

pub mod bottles;
pub mod capture;
pub mod session;

pub use bottles::{
    BottleDetail, BottleReplacementInput, NewBottle, bottles_for_cast, create_bottle, get_bottle,
    list_replacements, replace_bottle, update_bottle_status,
};
pub use capture::{
    CaptureSummaryRow, SampleCaptureInput, capture_summary, capture_summary_csv, list_sample_captures,
    record_sample_capture,
};
pub use session::{
    CloseSession, NewSampleTiming, OpenSession, TimingStatus, close_session, list_sessions, list_timings,
    open_session, set_sample_timing,
};
