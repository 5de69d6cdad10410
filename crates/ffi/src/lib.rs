//! C ABI for the sub-grid burning area (SGBA) solvers.
//!
//! The atmosphere model owns both buffers: it passes the level-set field and an
//! output array of the same `nx * ny` row-major shape, and receives an error code.
//! On failure, `fire_sgba_get_last_error()` describes what went wrong and
//! `fire_sgba_get_last_error_cell()` locates the failing cell. The boundary ring
//! of the output is filled with NaN.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

mod error;
mod helpers;

pub use error::{
    fire_sgba_get_last_error, fire_sgba_get_last_error_cell, fire_sgba_get_last_error_code,
    FireSgbaErrorCode,
};

use std::mem::size_of;
use std::slice;

use fire_sgba_core::{compute_burning_area, LevelSetField, SgbaConfig, SgbaMethod};

use crate::error::DefaultFireSgbaError;
use crate::helpers::{clear_last_error, track_error};

/// SGBA method selector.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireSgbaMethod {
    /// 9-point weighted average of the level-set field
    WeightedAverage = 0,
    /// Explicit fire-front reconstruction
    FrontReconstruction = 1,
}

impl From<FireSgbaMethod> for SgbaMethod {
    fn from(method: FireSgbaMethod) -> Self {
        match method {
            FireSgbaMethod::WeightedAverage => SgbaMethod::WeightedAverage,
            FireSgbaMethod::FrontReconstruction => SgbaMethod::FrontReconstruction,
        }
    }
}

/// Computes the burning fraction of every interior cell.
///
/// # Arguments
/// * `method` - Which SGBA method to use
/// * `phi` - Row-major level-set field, `phi[y * nx + x]`, with y running south to north
/// * `nx` - Grid size in x (west to east)
/// * `ny` - Grid size in y (south to north)
/// * `out` - Output array for the burning fractions
/// * `out_len` - Length of `out`, at least `nx * ny`
///
/// # Returns
/// `Ok` on success. On error `out` is left untouched and the thread-local
/// last error holds the message (and the cell, for per-cell failures).
///
/// # Safety
/// - `phi` must point to `nx * ny` readable `f64` values
/// - `out` must point to `out_len` writable `f64` values
/// - `phi` and `out` must not overlap
#[no_mangle]
pub extern "C" fn fire_sgba_compute(
    method: FireSgbaMethod,
    phi: *const f64,
    nx: usize,
    ny: usize,
    out: *mut f64,
    out_len: usize,
) -> FireSgbaErrorCode {
    if phi.is_null() {
        return track_error(&DefaultFireSgbaError::null_pointer("phi"));
    }
    if out.is_null() {
        return track_error(&DefaultFireSgbaError::null_pointer("out"));
    }

    let Some(len) = nx.checked_mul(ny) else {
        return track_error(&DefaultFireSgbaError::invalid_parameter(format!(
            "Grid dimensions {nx}x{ny} overflow"
        )));
    };
    if out_len < len {
        return track_error(&DefaultFireSgbaError::buffer_too_small(len, out_len));
    }

    let phi_start = phi as usize;
    let out_start = out as usize;
    let bytes = len * size_of::<f64>();
    if len > 0 && phi_start < out_start + bytes && out_start < phi_start + bytes {
        return track_error(&DefaultFireSgbaError::invalid_parameter(
            "Buffers 'phi' and 'out' overlap".to_string(),
        ));
    }

    let phi_values = unsafe { slice::from_raw_parts(phi, len) };
    let field = match LevelSetField::new(phi_values, nx, ny) {
        Ok(field) => field,
        Err(e) => return track_error(&DefaultFireSgbaError::from(&e)),
    };

    let config = SgbaConfig::with_method(method.into());
    match compute_burning_area(&field, &config) {
        Ok(fraction) => {
            let out_values = unsafe { slice::from_raw_parts_mut(out, len) };
            out_values.copy_from_slice(fraction.as_slice());
            clear_last_error();
            FireSgbaErrorCode::Ok
        }
        Err(e) => track_error(&DefaultFireSgbaError::from(&e)),
    }
}

/// Weighted-average shortcut for `fire_sgba_compute`.
///
/// # Safety
/// Same contract as `fire_sgba_compute`.
#[no_mangle]
pub extern "C" fn fire_sgba_wa(
    phi: *const f64,
    nx: usize,
    ny: usize,
    out: *mut f64,
    out_len: usize,
) -> FireSgbaErrorCode {
    fire_sgba_compute(FireSgbaMethod::WeightedAverage, phi, nx, ny, out, out_len)
}

/// Front-reconstruction shortcut for `fire_sgba_compute`.
///
/// # Safety
/// Same contract as `fire_sgba_compute`.
#[no_mangle]
pub extern "C" fn fire_sgba_effr(
    phi: *const f64,
    nx: usize,
    ny: usize,
    out: *mut f64,
    out_len: usize,
) -> FireSgbaErrorCode {
    fire_sgba_compute(FireSgbaMethod::FrontReconstruction, phi, nx, ny, out, out_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    const TRIANGLES: [f64; 9] = [0.0, 0.2, 0.0, 0.2, 0.6, 0.2, 0.0, 0.2, 0.0];

    fn last_error_message() -> Option<String> {
        let msg = fire_sgba_get_last_error();
        if msg.is_null() {
            return None;
        }
        Some(unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned())
    }

    #[test]
    fn test_effr_triangles() {
        let mut out = [0.0; 9];
        let code = fire_sgba_effr(TRIANGLES.as_ptr(), 3, 3, out.as_mut_ptr(), out.len());
        assert_eq!(code, FireSgbaErrorCode::Ok);
        assert!((out[4] - 0.125).abs() < 1e-12);
        assert!(out[0].is_nan() && out[8].is_nan());
        assert_eq!(fire_sgba_get_last_error_code(), FireSgbaErrorCode::Ok);
        assert!(last_error_message().is_none());
    }

    #[test]
    fn test_wa_triangles() {
        let mut out = [0.0; 9];
        let code = fire_sgba_wa(TRIANGLES.as_ptr(), 3, 3, out.as_mut_ptr(), out.len());
        assert_eq!(code, FireSgbaErrorCode::Ok);
        assert!((out[4] - 0.4125).abs() < 1e-12);
    }

    #[test]
    fn test_null_pointers() {
        let mut out = [0.0; 9];
        let code = fire_sgba_effr(ptr::null(), 3, 3, out.as_mut_ptr(), out.len());
        assert_eq!(code, FireSgbaErrorCode::NullPointer);
        assert_eq!(
            last_error_message().as_deref(),
            Some("Parameter 'phi' cannot be null")
        );

        let code = fire_sgba_wa(TRIANGLES.as_ptr(), 3, 3, ptr::null_mut(), 9);
        assert_eq!(code, FireSgbaErrorCode::NullPointer);
        assert_eq!(fire_sgba_get_last_error_code(), FireSgbaErrorCode::NullPointer);
    }

    #[test]
    fn test_buffer_too_small() {
        let mut out = [7.0; 8];
        let code = fire_sgba_effr(TRIANGLES.as_ptr(), 3, 3, out.as_mut_ptr(), out.len());
        assert_eq!(code, FireSgbaErrorCode::BufferTooSmall);
        assert_eq!(out, [7.0; 8]);
    }

    #[test]
    fn test_dimension_overflow() {
        let mut out = [0.0; 9];
        let code = fire_sgba_wa(TRIANGLES.as_ptr(), usize::MAX, 2, out.as_mut_ptr(), out.len());
        assert_eq!(code, FireSgbaErrorCode::InvalidParameter);
    }

    #[test]
    fn test_overlapping_buffers() {
        let mut buffer = [0.1; 12];
        let phi = buffer.as_ptr();
        let out = buffer[3..].as_mut_ptr();
        let code = fire_sgba_wa(phi, 3, 3, out, 9);
        assert_eq!(code, FireSgbaErrorCode::InvalidParameter);
    }

    #[test]
    fn test_non_finite_reports_cell() {
        let mut phi = TRIANGLES;
        phi[5] = f64::NAN;
        let mut out = [0.0; 9];
        let code = fire_sgba_wa(phi.as_ptr(), 3, 3, out.as_mut_ptr(), out.len());
        assert_eq!(code, FireSgbaErrorCode::NonFiniteValue);

        let (mut x, mut y) = (0, 0);
        assert!(fire_sgba_get_last_error_cell(&mut x, &mut y));
        assert_eq!((x, y), (2, 1));
    }

    #[test]
    fn test_invalid_case_reports_cell_then_clears() {
        let mut phi = [1.0; 16];
        phi[2 * 4 + 2] = 0.5;
        let mut out = [0.0; 16];
        let code = fire_sgba_effr(phi.as_ptr(), 4, 4, out.as_mut_ptr(), out.len());
        assert_eq!(code, FireSgbaErrorCode::InvalidCase);
        assert_eq!(fire_sgba_get_last_error_code(), FireSgbaErrorCode::InvalidCase);

        let (mut x, mut y) = (0, 0);
        assert!(fire_sgba_get_last_error_cell(&mut x, &mut y));
        assert_eq!((x, y), (2, 2));

        // A later success clears the diagnostics
        let code = fire_sgba_effr(TRIANGLES.as_ptr(), 3, 3, out.as_mut_ptr(), out.len());
        assert_eq!(code, FireSgbaErrorCode::Ok);
        assert!(!fire_sgba_get_last_error_cell(&mut x, &mut y));
        assert_eq!((x, y), (2, 2));
    }

    #[test]
    fn test_empty_grid() {
        let mut out = [0.0; 9];
        let code = fire_sgba_effr(TRIANGLES.as_ptr(), 0, 3, out.as_mut_ptr(), out.len());
        assert_eq!(code, FireSgbaErrorCode::Ok);
        assert!(!fire_sgba_get_last_error_cell(ptr::null_mut(), ptr::null_mut()));
    }
}
