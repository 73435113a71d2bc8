//! C FFI bindings for chaojiying.
//!
//! Provides a simple blocking API for calling the recognition service from C,
//! Python, Go, etc. Credentials come from the `CHAOJIYING_*` environment
//! variables; every call builds a fresh client.
//!
//! # Example (C)
//!
//! ```c
//! #include "chaojiying.h"
//!
//! int main() {
//!     char* result = chaojiying_identify_json(1902, 0, image_base64);
//!     if (result) {
//!         printf("Result: %s\n", result);
//!         chaojiying_free_string(result);
//!     }
//!     return 0;
//! }
//! ```

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::Serialize;

use crate::blocking::Chaojiying;
use crate::error::Result;

/// Convert Rust String to C string pointer.
fn string_to_ptr(s: String) -> *mut c_char {
    CString::new(s)
        .map(|cs| cs.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Convert C string to Rust String, returns None if null or invalid UTF-8.
unsafe fn ptr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Render an operation outcome as `{"success": true, ...payload}` or
/// `{"success": false, "error": "..."}`.
fn outcome_json<T: Serialize>(outcome: Result<T>) -> String {
    let value = outcome
        .and_then(|payload| serde_json::to_value(payload).map_err(Into::into))
        .map(|payload| {
            let mut json = serde_json::json!({ "success": true });
            if let (Some(map), serde_json::Value::Object(fields)) = (json.as_object_mut(), payload) {
                map.extend(fields);
            }
            json
        });

    match value {
        Ok(json) => json.to_string(),
        Err(e) => serde_json::json!({
            "success": false,
            "error": e.to_string()
        })
        .to_string(),
    }
}

fn error_json(message: &str) -> *mut c_char {
    string_to_ptr(serde_json::json!({ "success": false, "error": message }).to_string())
}

/// Query the account balance (blocking).
///
/// Returns a JSON string the caller must free with `chaojiying_free_string`.
#[no_mangle]
pub extern "C" fn chaojiying_user_info_json() -> *mut c_char {
    let json = outcome_json(Chaojiying::new().and_then(|client| client.user_info()));
    string_to_ptr(json)
}

/// Recognize a base64-encoded image (blocking).
///
/// # Returns
///
/// A JSON string on success:
/// ```json
/// {"success": true, "err_no": 0, "err_str": "", "pic_id": "...", "pic_str": "...", "md5": "..."}
/// ```
///
/// Or on error:
/// ```json
/// {"success": false, "error": "error message"}
/// ```
///
/// The caller must free the string with `chaojiying_free_string`.
///
/// # Safety
///
/// - `image_base64` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn chaojiying_identify_json(
    code_type: u32,
    min_len: u32,
    image_base64: *const c_char,
) -> *mut c_char {
    let image = match ptr_to_string(image_base64) {
        Some(s) => s,
        None => return error_json("image_base64 is required"),
    };

    let json = outcome_json(
        Chaojiying::new().and_then(|client| client.identify_image(code_type, min_len, &image)),
    );
    string_to_ptr(json)
}

/// Report a wrong recognition result (blocking).
///
/// The caller must free the returned JSON string with `chaojiying_free_string`.
///
/// # Safety
///
/// - `task_id` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn chaojiying_report_error_json(task_id: *const c_char) -> *mut c_char {
    let task_id = match ptr_to_string(task_id) {
        Some(s) if !s.is_empty() => s,
        _ => return error_json("task_id is required"),
    };

    let json = outcome_json(Chaojiying::new().and_then(|client| client.report_error(&task_id)));
    string_to_ptr(json)
}

/// Free a string returned by chaojiying FFI functions.
///
/// # Safety
///
/// - `s` must be NULL or a valid pointer previously returned by chaojiying
/// - Each string must only be freed once
#[no_mangle]
pub unsafe extern "C" fn chaojiying_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

/// Get the library version.
///
/// # Returns
///
/// A static string with the version number. Do NOT free this string.
#[no_mangle]
pub extern "C" fn chaojiying_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
