//! FFI bindings for Headache Insights
//!
//! This module provides C-compatible functions for calling the engine from the
//! mobile host. All functions use C strings (null-terminated UTF-8) and return
//! allocated memory that must be freed by the caller using `hi_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::clock::ReferenceTime;
use crate::error::AnalysisError;
use crate::ingest::EpisodeAdapter;
use crate::pipeline::{episodes_to_export_json, episodes_to_report_json, InsightsEngine};
use crate::types::Episode;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert a C string argument to a Rust string
unsafe fn read_arg(ptr: *const c_char, name: &str) -> Result<String, AnalysisError> {
    if ptr.is_null() {
        return Err(AnalysisError::ParseError(format!("Null {name} pointer")));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_string)
        .map_err(|_| AnalysisError::ParseError(format!("Invalid UTF-8 in {name}")))
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Run `f`, returning its JSON as an owned C string or NULL with the last error set
fn json_result(f: impl FnOnce() -> Result<String, AnalysisError>) -> *mut c_char {
    clear_last_error();
    match f() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Build a report from a JSON array of episodes.
///
/// # Safety
/// - `episodes_json` and `now` must be valid null-terminated C strings.
/// - `now` is an RFC 3339 timestamp carrying the user's local offset.
/// - Returns a newly allocated string that must be freed with `hi_free_string`.
/// - Returns NULL on error; call `hi_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn hi_build_report(
    episodes_json: *const c_char,
    now: *const c_char,
) -> *mut c_char {
    json_result(|| {
        let episodes = read_arg(episodes_json, "episodes JSON")?;
        let now = read_arg(now, "now")?;
        episodes_to_report_json(&episodes, &now)
    })
}

/// Build an export document from a JSON array of episodes.
///
/// # Safety
/// Same contract as `hi_build_report`.
#[no_mangle]
pub unsafe extern "C" fn hi_export_report(
    episodes_json: *const c_char,
    now: *const c_char,
) -> *mut c_char {
    json_result(|| {
        let episodes = read_arg(episodes_json, "episodes JSON")?;
        let now = read_arg(now, "now")?;
        episodes_to_export_json(&episodes, &now)
    })
}

/// Evaluate the red-flag tier of a single episode (JSON object).
///
/// # Safety
/// - `episode_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `hi_free_string`.
/// - Returns NULL on error; call `hi_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn hi_evaluate_red_flag(episode_json: *const c_char) -> *mut c_char {
    json_result(|| {
        let json = read_arg(episode_json, "episode JSON")?;
        let episode: Episode = serde_json::from_str(&json)?;
        let assessment = InsightsEngine::default().evaluate_red_flag(&episode);
        Ok(serde_json::to_string(&assessment)?)
    })
}

/// Return the assessments of every episode that should show a safety banner.
///
/// # Safety
/// Same contract as `hi_evaluate_red_flag`, with a JSON array of episodes.
#[no_mangle]
pub unsafe extern "C" fn hi_active_red_flags(episodes_json: *const c_char) -> *mut c_char {
    json_result(|| {
        let json = read_arg(episodes_json, "episodes JSON")?;
        let episodes = EpisodeAdapter::parse_array(&json)?;
        let active = InsightsEngine::default().active_red_flags(&episodes);
        Ok(serde_json::to_string(&active)?)
    })
}

/// Check acute-medication days in the month of `now`.
///
/// # Safety
/// Same contract as `hi_build_report`.
#[no_mangle]
pub unsafe extern "C" fn hi_check_medication_overuse(
    episodes_json: *const c_char,
    now: *const c_char,
) -> *mut c_char {
    json_result(|| {
        let json = read_arg(episodes_json, "episodes JSON")?;
        let reference = ReferenceTime::parse(&read_arg(now, "now")?)?;
        let episodes = EpisodeAdapter::parse_array(&json)?;
        let status = InsightsEngine::default().check_medication_overuse(&episodes, &reference);
        Ok(serde_json::to_string(&status)?)
    })
}

// ============================================================================
// Configured Engine API
// ============================================================================

/// Opaque handle to a configured InsightsEngine
pub struct InsightsEngineHandle {
    engine: InsightsEngine,
}

/// Create an engine from a JSON configuration, or defaults when `config_json` is NULL.
///
/// # Safety
/// - `config_json` must be NULL or a valid null-terminated C string.
/// - Must be freed with `hi_engine_free`.
/// - Returns NULL on error; call `hi_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn hi_engine_new(config_json: *const c_char) -> *mut InsightsEngineHandle {
    clear_last_error();

    let engine = if config_json.is_null() {
        Ok(InsightsEngine::default())
    } else {
        read_arg(config_json, "config JSON").and_then(|json| InsightsEngine::from_config_json(&json))
    };

    match engine {
        Ok(engine) => Box::into_raw(Box::new(InsightsEngineHandle { engine })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free an engine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `hi_engine_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn hi_engine_free(engine: *mut InsightsEngineHandle) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Build a report with a configured engine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `hi_engine_new`.
/// - Otherwise the same contract as `hi_build_report`.
#[no_mangle]
pub unsafe extern "C" fn hi_engine_build_report(
    engine: *const InsightsEngineHandle,
    episodes_json: *const c_char,
    now: *const c_char,
) -> *mut c_char {
    if engine.is_null() {
        clear_last_error();
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }
    let handle = &*engine;

    json_result(|| {
        let episodes = EpisodeAdapter::parse_array(&read_arg(episodes_json, "episodes JSON")?)?;
        let reference = ReferenceTime::parse(&read_arg(now, "now")?)?;
        let report = handle.engine.build_report(&episodes, &reference);
        Ok(serde_json::to_string(&report)?)
    })
}

/// Check medication overuse with a configured engine (uses its preventive list).
///
/// # Safety
/// Same contract as `hi_engine_build_report`.
#[no_mangle]
pub unsafe extern "C" fn hi_engine_check_medication_overuse(
    engine: *const InsightsEngineHandle,
    episodes_json: *const c_char,
    now: *const c_char,
) -> *mut c_char {
    if engine.is_null() {
        clear_last_error();
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }
    let handle = &*engine;

    json_result(|| {
        let episodes = EpisodeAdapter::parse_array(&read_arg(episodes_json, "episodes JSON")?)?;
        let reference = ReferenceTime::parse(&read_arg(now, "now")?)?;
        let status = handle.engine.check_medication_overuse(&episodes, &reference);
        Ok(serde_json::to_string(&status)?)
    })
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by an `hi_` function.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by an `hi_` function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn hi_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next `hi_` call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn hi_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn hi_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sudden_episode_json() -> CString {
        CString::new(
            r#"{
                "id": "00000000-0000-4000-8000-000000000001",
                "started_at": "2024-03-20T11:00:00Z",
                "severity": 5,
                "onset_speed": "instantaneous"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ffi_evaluate_red_flag() {
        let json = sudden_episode_json();

        unsafe {
            let result = hi_evaluate_red_flag(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let value: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(value["tier"], "urgent");

            hi_free_string(result);
        }
    }

    #[test]
    fn test_ffi_build_report_below_gate() {
        let episodes = CString::new(format!(
            "[{}]",
            sudden_episode_json().to_str().unwrap()
        ))
        .unwrap();
        let now = CString::new("2024-03-20T12:00:00Z").unwrap();

        unsafe {
            let result = hi_build_report(episodes.as_ptr(), now.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let value: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(value["total_logs"], 1);
            assert_eq!(value["has_enough_data"], false);

            hi_free_string(result);
        }
    }

    #[test]
    fn test_ffi_engine_lifecycle() {
        let config = CString::new(r#"{"preventive_medications": ["Topiramate"]}"#).unwrap();
        let episodes = CString::new(
            r#"[{
                "id": "00000000-0000-4000-8000-000000000002",
                "started_at": "2024-03-10T09:00:00Z",
                "severity": 3,
                "retrospective": {"medication": {"name": "Topiramate"}}
            }]"#,
        )
        .unwrap();
        let now = CString::new("2024-03-20T12:00:00Z").unwrap();

        unsafe {
            let engine = hi_engine_new(config.as_ptr());
            assert!(!engine.is_null());

            let result = hi_engine_check_medication_overuse(engine, episodes.as_ptr(), now.as_ptr());
            assert!(!result.is_null());
            let value: serde_json::Value =
                serde_json::from_str(CStr::from_ptr(result).to_str().unwrap()).unwrap();
            assert_eq!(value["acute_days"], 0);
            hi_free_string(result);

            let report = hi_engine_build_report(engine, episodes.as_ptr(), now.as_ptr());
            assert!(!report.is_null());
            hi_free_string(report);

            hi_engine_free(engine);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let now = CString::new("2024-03-20T12:00:00Z").unwrap();

            let result = hi_build_report(invalid_json.as_ptr(), now.as_ptr());
            assert!(result.is_null());

            let error = hi_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(!error_str.is_empty());

            let engine = hi_engine_new(invalid_json.as_ptr());
            assert!(engine.is_null());
            assert!(!hi_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = hi_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
