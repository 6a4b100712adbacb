use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::time::Instant;

use log::warn;
use ultracalc_core::{AngleMode, CalcError, Key, Session};

/// Error codes returned by `ultracalc_result_error_kind`.
pub const ERROR_NONE: u32 = 0;
pub const ERROR_DIVISION_BY_ZERO: u32 = 1;
pub const ERROR_INVALID_EXPRESSION: u32 = 2;

/// The result of an evaluation: the text to display, or an error code.
pub struct EvalResult(Result<String, u32>);

fn error_code(err: &CalcError) -> u32 {
    match err {
        CalcError::DivisionByZero => ERROR_DIVISION_BY_ZERO,
        CalcError::InvalidExpression(_) => ERROR_INVALID_EXPRESSION,
    }
}

fn alloc_c_str(s: &str) -> *mut c_char {
    // the texts built by the calculator never contain a NUL byte
    match CString::new(s) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

unsafe fn read_c_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

#[no_mangle]
pub extern "C" fn ultracalc_session_new() -> *mut Session {
    Box::into_raw(Box::new(Session::new()))
}

#[no_mangle]
pub unsafe extern "C" fn ultracalc_session_free(s: *mut Session) {
    if !s.is_null() {
        // let the compiler drop the box
        let _ = Box::from_raw(s);
    }
}

#[no_mangle]
pub unsafe extern "C" fn ultracalc_session_set_degrees(s: *mut Session, degrees: bool) {
    if let Some(session) = s.as_mut() {
        session.set_angle_mode(if degrees {
            AngleMode::Degrees
        } else {
            AngleMode::Radians
        });
    }
}

/// Evaluates `expr` in the session, as if it had been typed followed by
/// `=`.
#[no_mangle]
pub unsafe extern "C" fn ultracalc_session_eval(
    s: *mut Session,
    expr: *const c_char,
) -> *mut EvalResult {
    let result = match (s.as_mut(), read_c_str(expr)) {
        (Some(session), Some(expr)) => {
            session.clear();
            session.append(expr);
            session
                .calculate(Instant::now())
                .map(|eval| eval.value.to_string())
                .map_err(|err| error_code(&err))
        }
        _ => {
            warn!("evaluation called with a null session or an invalid string");
            Err(ERROR_INVALID_EXPRESSION)
        }
    };
    Box::into_raw(Box::new(EvalResult(result)))
}

/// Presses the button with the given label. Returns false when the label is
/// unknown.
#[no_mangle]
pub unsafe extern "C" fn ultracalc_session_press(s: *mut Session, label: *const c_char) -> bool {
    let key = read_c_str(label).and_then(Key::from_label);
    match (s.as_mut(), key) {
        (Some(session), Some(key)) => {
            session.press(key, Instant::now());
            true
        }
        _ => false,
    }
}

/// Runs the delayed reset after an error. Hosts call this from a timer.
#[no_mangle]
pub unsafe extern "C" fn ultracalc_session_tick(s: *mut Session) -> bool {
    match s.as_mut() {
        Some(session) => session.tick(Instant::now()),
        None => false,
    }
}

/// The text of the main display, to free with `ultracalc_string_free`.
#[no_mangle]
pub unsafe extern "C" fn ultracalc_session_get_display(s: *const Session) -> *mut c_char {
    match s.as_ref() {
        Some(session) => alloc_c_str(session.display()),
        None => ptr::null_mut(),
    }
}

#[no_mangle]
pub unsafe extern "C" fn ultracalc_result_free(r: *mut EvalResult) {
    if !r.is_null() {
        let _ = Box::from_raw(r);
    }
}

#[no_mangle]
pub unsafe extern "C" fn ultracalc_result_has_failed(r: *const EvalResult) -> bool {
    match r.as_ref() {
        Some(EvalResult(result)) => result.is_err(),
        None => true,
    }
}

#[no_mangle]
pub unsafe extern "C" fn ultracalc_result_error_kind(r: *const EvalResult) -> u32 {
    match r.as_ref() {
        Some(EvalResult(Ok(_))) => ERROR_NONE,
        Some(EvalResult(Err(code))) => *code,
        None => ERROR_INVALID_EXPRESSION,
    }
}

/// The result text, or null if the evaluation failed.
#[no_mangle]
pub unsafe extern "C" fn ultracalc_result_get_text(r: *const EvalResult) -> *mut c_char {
    match r.as_ref() {
        Some(EvalResult(Ok(text))) => alloc_c_str(text),
        _ => ptr::null_mut(),
    }
}

#[no_mangle]
pub unsafe extern "C" fn ultracalc_string_free(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take_string(s: *mut c_char) -> String {
        assert!(!s.is_null());
        let text = CStr::from_ptr(s).to_str().unwrap().to_string();
        ultracalc_string_free(s);
        text
    }

    unsafe fn eval(session: *mut Session, expr: &str) -> *mut EvalResult {
        let expr = CString::new(expr).unwrap();
        ultracalc_session_eval(session, expr.as_ptr())
    }

    #[test]
    fn it_evaluates_through_the_c_abi() {
        unsafe {
            let session = ultracalc_session_new();

            let r = eval(session, "sin(90");
            assert!(!ultracalc_result_has_failed(r));
            assert_eq!(ultracalc_result_error_kind(r), ERROR_NONE);
            assert_eq!(take_string(ultracalc_result_get_text(r)), "1");
            ultracalc_result_free(r);

            ultracalc_session_set_degrees(session, false);
            let r = eval(session, "cos(pi)");
            assert_eq!(take_string(ultracalc_result_get_text(r)), "-1");
            ultracalc_result_free(r);

            ultracalc_session_free(session);
        }
    }

    #[test]
    fn it_reports_error_kinds() {
        unsafe {
            let session = ultracalc_session_new();

            let r = eval(session, "1/0");
            assert!(ultracalc_result_has_failed(r));
            assert_eq!(ultracalc_result_error_kind(r), ERROR_DIVISION_BY_ZERO);
            assert!(ultracalc_result_get_text(r).is_null());
            ultracalc_result_free(r);
            assert_eq!(take_string(ultracalc_session_get_display(session)), "Error");

            let r = eval(session, "sqrt(-1)");
            assert_eq!(ultracalc_result_error_kind(r), ERROR_INVALID_EXPRESSION);
            ultracalc_result_free(r);

            let r = ultracalc_session_eval(session, ptr::null());
            assert_eq!(ultracalc_result_error_kind(r), ERROR_INVALID_EXPRESSION);
            ultracalc_result_free(r);

            let bad = [0xffu8 as c_char, 0];
            let r = ultracalc_session_eval(session, bad.as_ptr());
            assert_eq!(ultracalc_result_error_kind(r), ERROR_INVALID_EXPRESSION);
            ultracalc_result_free(r);

            ultracalc_session_free(session);
        }
    }

    #[test]
    fn it_presses_buttons() {
        unsafe {
            let session = ultracalc_session_new();
            for label in &["7", "×", "6", "="] {
                let label = CString::new(*label).unwrap();
                assert!(ultracalc_session_press(session, label.as_ptr()));
            }
            assert_eq!(take_string(ultracalc_session_get_display(session)), "42");

            let label = CString::new("theme").unwrap();
            assert!(!ultracalc_session_press(session, label.as_ptr()));
            assert!(!ultracalc_session_tick(session));

            ultracalc_session_free(session);
        }
    }
}
