use crate::error::{with_last_error_mut, FireSgbaError, FireSgbaErrorCode};
use std::ffi::CString;

/// Set the thread-local error message, code and cell.
/// Internal helper for FFI functions to record failure details.
/// Accepts any type implementing `FireSgbaError` trait.
pub(crate) fn set_last_error(error: &impl FireSgbaError) {
    with_last_error_mut(|last| {
        last.message = CString::new(error.msg()).ok();
        last.code = error.code();
        last.cell = error.cell();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FireSgbaError) -> FireSgbaErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error state.
/// Called on successful operations so stale diagnostics never outlive a success.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|last| {
        last.message = None;
        last.code = FireSgbaErrorCode::Ok;
        last.cell = None;
    });
}
