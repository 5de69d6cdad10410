use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use fire_sgba_core::SgbaError;

/// Common interface for FFI error types.
///
/// This trait provides a unified way to handle errors across the FFI boundary,
/// allowing both simple error codes and custom error messages.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
/// - `cell()` - Returns the failing fire-grid cell, if the error has one
pub(crate) trait FireSgbaError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> FireSgbaErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;

    /// Returns the `(x, y)` cell the error refers to.
    fn cell(&self) -> Option<(usize, usize)> {
        None
    }
}

/// Default implementation of `FireSgbaError` for FFI error scenarios.
///
/// Wraps a `FireSgbaErrorCode` with a message and, for per-cell failures, the
/// cell coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFireSgbaError {
    code: FireSgbaErrorCode,
    msg: String,
    cell: Option<(usize, usize)>,
}

impl DefaultFireSgbaError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"phi"`, `"out"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FireSgbaErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
            cell: None,
        }
    }

    /// Create error for an output buffer shorter than the grid.
    ///
    /// # Arguments
    /// * `required` - Number of values the grid needs (`nx * ny`)
    /// * `actual` - Length the caller passed
    pub fn buffer_too_small(required: usize, actual: usize) -> Self {
        Self {
            code: FireSgbaErrorCode::BufferTooSmall,
            msg: format!("Output buffer holds {actual} values but the grid needs {required}"),
            cell: None,
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: FireSgbaErrorCode::InvalidParameter,
            msg: message,
            cell: None,
        }
    }
}

impl From<&SgbaError> for DefaultFireSgbaError {
    fn from(error: &SgbaError) -> Self {
        let code = match error {
            SgbaError::ShapeMismatch { .. } => FireSgbaErrorCode::ShapeMismatch,
            SgbaError::NonFiniteValue { .. } => FireSgbaErrorCode::NonFiniteValue,
            SgbaError::InvalidCase { .. } => FireSgbaErrorCode::InvalidCase,
            SgbaError::DegenerateDivision { .. } => FireSgbaErrorCode::DegenerateDivision,
        };
        Self {
            code,
            msg: error.to_string(),
            cell: error.cell(),
        }
    }
}

impl FireSgbaError for DefaultFireSgbaError {
    fn code(&self) -> FireSgbaErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }

    fn cell(&self) -> Option<(usize, usize)> {
        self.cell
    }
}

/// FFI error codes returned by burning area functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireSgbaErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter passed to function.
    InvalidParameter = 2,

    /// `nx * ny` does not describe the level-set buffer (or overflows).
    ShapeMismatch = 3,

    /// A level-set sample is NaN or infinite.
    NonFiniteValue = 4,

    /// A quadrant's front-crossing pattern has no area formula.
    /// Typically a node lying exactly on the 0.5 threshold.
    InvalidCase = 5,

    /// An area formula's denominator vanished.
    DegenerateDivision = 6,

    /// Output buffer shorter than `nx * ny`.
    BufferTooSmall = 7,
}

impl From<DefaultFireSgbaError> for FireSgbaErrorCode {
    fn from(error: DefaultFireSgbaError) -> Self {
        error.code
    }
}

/// Most recent FFI error on this thread.
pub(crate) struct LastError {
    pub message: Option<CString>,
    pub code: FireSgbaErrorCode,
    pub cell: Option<(usize, usize)>,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error.
    /// The CString is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<LastError> = const {
        RefCell::new(LastError {
            message: None,
            code: FireSgbaErrorCode::Ok,
            cell: None,
        })
    };
}

/// Internal helper to read `LAST_ERROR` thread-local storage.
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&LastError) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage.
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut LastError) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call succeeded or the message cannot be converted to a C string.
///
/// # Thread Safety
/// Error messages are stored per-thread (thread-local storage), so this is thread-safe.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// FireSgbaErrorCode err = fire_sgba_effr(phi, nx, ny, area, nx * ny);
/// if (err != Ok) {
///     const char* error = fire_sgba_get_last_error();
///     if (error) {
///         fprintf(stderr, "SGBA failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fire_sgba_get_last_error() -> *const c_char {
    with_last_error(|last| {
        last.message
            .as_ref()
            .map_or(ptr::null(), |cs| cs.as_ptr())
    })
}

/// Retrieve the most recent FFI error code.
///
/// Returns `Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn fire_sgba_get_last_error_code() -> FireSgbaErrorCode {
    with_last_error(|last| last.code)
}

/// Retrieve the fire-grid cell of the most recent per-cell error.
///
/// Writes the zero-based `(x, y)` coordinates of the failing cell and returns
/// `true` when the last error was `NonFiniteValue`, `InvalidCase` or
/// `DegenerateDivision`. Returns `false` and leaves the outputs untouched
/// otherwise.
///
/// # Safety
/// `x` and `y` must be valid, writable pointers (either may be null to skip it).
#[no_mangle]
pub extern "C" fn fire_sgba_get_last_error_cell(x: *mut usize, y: *mut usize) -> bool {
    let Some((cell_x, cell_y)) = with_last_error(|last| last.cell) else {
        return false;
    };
    unsafe {
        if !x.is_null() {
            *x = cell_x;
        }
        if !y.is_null() {
            *y = cell_y;
        }
    }
    true
}
