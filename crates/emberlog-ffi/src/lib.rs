//! C ABI for emberlog
//!
//! The only crate in the workspace that handles raw pointers. Every entry
//! point checks its handle for NULL, validates C strings as UTF-8, and runs
//! its body under `catch_unwind`, so no panic unwinds into the caller.
//! Failures on a live context are recorded in its last-error cell and can be
//! read back with `emberlog_get_last_error`.
//!
//! Ownership: the `emberlog_create_context*` functions hand out a uniquely
//! owned handle; `emberlog_free_context` takes it back. Nothing else moves
//! ownership. Freeing twice or using a freed handle is undefined behavior.

#![deny(clippy::all)]

use std::any::Any;
use std::ffi::{c_char, c_int, CStr};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::slice;

use emberlog_core::{error_log, warn_log, Context, Error, Level};

pub const EMBERLOG_LEVEL_TRACE: c_int = 0;
pub const EMBERLOG_LEVEL_DEBUG: c_int = 1;
pub const EMBERLOG_LEVEL_INFO: c_int = 2;
pub const EMBERLOG_LEVEL_WARN: c_int = 3;
pub const EMBERLOG_LEVEL_ERROR: c_int = 4;

/// Opaque logger handle
pub struct EmberlogContext {
    inner: Context,
}

// ============================================================================
// Boundary helpers
// ============================================================================

/// Move a context out to the caller as a raw handle
///
/// Pair with exactly one `emberlog_free_context`.
pub fn into_handle(context: Context) -> *mut EmberlogContext {
    Box::into_raw(Box::new(EmberlogContext { inner: context }))
}

fn handle_or_null(result: emberlog_core::Result<Context>) -> *mut EmberlogContext {
    match result {
        Ok(context) => into_handle(context),
        Err(e) => {
            warn_log!("Context creation failed: {}", e);
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `ctx` must be NULL or a live handle from `emberlog_create_context*`.
unsafe fn context_ref<'a>(ctx: *const EmberlogContext) -> Option<&'a Context> {
    // SAFETY: caller guarantees ctx is NULL or valid
    unsafe { ctx.as_ref() }.map(|c| &c.inner)
}

/// # Safety
/// `ptr` must be NULL or point to a NUL-terminated string that outlives `'a`.
unsafe fn read_str<'a>(ptr: *const c_char, argument: &'static str) -> Result<&'a str, Error> {
    if ptr.is_null() {
        return Err(Error::NullArgument(argument));
    }
    // SAFETY: ptr is non-null and caller guarantees NUL termination
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|source| Error::InvalidEncoding { argument, source })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Run `f`, turning a panic into `sentinel` (recorded on `context` if given)
fn guarded<T>(context: Option<&Context>, sentinel: T, f: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error_log!("Panic caught at boundary: {}", message);
            if let Some(context) = context {
                context.record_error(&Error::Panic(message));
            }
            sentinel
        }
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Create a context from the discovered configuration file
///
/// Uses `EMBERLOG_CONFIG` if set, else `<config dir>/emberlog/config.yaml`;
/// a missing file means defaults. Returns NULL if the configuration can't
/// be parsed or its sink can't be opened.
#[no_mangle]
pub extern "C" fn emberlog_create_context() -> *mut EmberlogContext {
    guarded(None, ptr::null_mut(), || handle_or_null(Context::discover()))
}

/// Create a context from an explicit configuration file
///
/// NULL or empty `config_path` behaves like `emberlog_create_context`.
/// Returns NULL if the path is not UTF-8, the file is missing or invalid,
/// or its sink can't be opened.
///
/// # Safety
/// `config_path` must be NULL or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn emberlog_create_context_with_config(
    config_path: *const c_char,
) -> *mut EmberlogContext {
    guarded(None, ptr::null_mut(), || {
        if config_path.is_null() {
            return handle_or_null(Context::discover());
        }
        // SAFETY: non-null, caller guarantees NUL termination
        match unsafe { read_str(config_path, "config_path") } {
            Ok("") => handle_or_null(Context::discover()),
            Ok(path) => handle_or_null(Context::from_path(path)),
            Err(e) => {
                error_log!("{}", e);
                ptr::null_mut()
            }
        }
    })
}

/// Create a context from the discovered configuration with the
/// `apps.<app_name>` overrides applied
///
/// # Safety
/// `app_name` must be NULL or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn emberlog_create_context_for_app(
    app_name: *const c_char,
) -> *mut EmberlogContext {
    guarded(None, ptr::null_mut(), || {
        // SAFETY: caller guarantees app_name is NULL or NUL-terminated
        match unsafe { read_str(app_name, "app_name") } {
            Ok(name) => handle_or_null(Context::for_app(name)),
            Err(e) => {
                error_log!("{}", e);
                ptr::null_mut()
            }
        }
    })
}

/// Create a console context with explicit settings, bypassing configuration
///
/// `level` outside 0..=4 is clamped; any nonzero `colors` enables ANSI colors.
#[no_mangle]
pub extern "C" fn emberlog_create_context_simple(level: c_int, colors: c_int) -> *mut EmberlogContext {
    guarded(None, ptr::null_mut(), || {
        into_handle(Context::simple(Level::clamped(level), colors != 0))
    })
}

/// Destroy a context, closing its sink. NULL is a no-op.
///
/// # Safety
/// `ctx` must be NULL or a live handle, and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn emberlog_free_context(ctx: *mut EmberlogContext) {
    if ctx.is_null() {
        return;
    }
    guarded(None, (), || {
        // SAFETY: ctx is non-null and was created by Box::into_raw
        drop(unsafe { Box::from_raw(ctx) });
    });
}

// ============================================================================
// Logging
// ============================================================================

/// Log `message` under `tag` at `level`
///
/// No-op for a NULL handle or a level below the threshold. An out-of-range
/// level, a NULL string or invalid UTF-8 is recorded as the last error and
/// nothing is written; so is a sink write failure.
///
/// # Safety
/// `ctx` must be NULL or a live handle; `tag` and `message` must be NULL or
/// valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn emberlog_log(
    ctx: *mut EmberlogContext,
    level: c_int,
    tag: *const c_char,
    message: *const c_char,
) {
    // SAFETY: caller guarantees ctx is NULL or live
    let Some(context) = (unsafe { context_ref(ctx) }) else {
        return;
    };

    guarded(Some(context), (), || {
        let Some(level) = Level::from_i32(level) else {
            context.record_error(&Error::InvalidLevel(level));
            return;
        };
        if level < context.threshold() {
            return;
        }

        // SAFETY: caller guarantees both strings are NULL or NUL-terminated
        let (tag, message) = match unsafe { (read_str(tag, "tag"), read_str(message, "message")) } {
            (Ok(tag), Ok(message)) => (tag, message),
            (Err(e), _) | (_, Err(e)) => {
                context.record_error(&e);
                return;
            }
        };
        context.log(level, tag, message);
    });
}

/// `emberlog_log` at trace level
///
/// # Safety
/// See `emberlog_log`.
#[no_mangle]
pub unsafe extern "C" fn emberlog_trace(ctx: *mut EmberlogContext, tag: *const c_char, message: *const c_char) {
    // SAFETY: same contract as emberlog_log
    unsafe { emberlog_log(ctx, EMBERLOG_LEVEL_TRACE, tag, message) };
}

/// `emberlog_log` at debug level
///
/// # Safety
/// See `emberlog_log`.
#[no_mangle]
pub unsafe extern "C" fn emberlog_debug(ctx: *mut EmberlogContext, tag: *const c_char, message: *const c_char) {
    // SAFETY: same contract as emberlog_log
    unsafe { emberlog_log(ctx, EMBERLOG_LEVEL_DEBUG, tag, message) };
}

/// `emberlog_log` at info level
///
/// # Safety
/// See `emberlog_log`.
#[no_mangle]
pub unsafe extern "C" fn emberlog_info(ctx: *mut EmberlogContext, tag: *const c_char, message: *const c_char) {
    // SAFETY: same contract as emberlog_log
    unsafe { emberlog_log(ctx, EMBERLOG_LEVEL_INFO, tag, message) };
}

/// `emberlog_log` at warn level
///
/// # Safety
/// See `emberlog_log`.
#[no_mangle]
pub unsafe extern "C" fn emberlog_warn(ctx: *mut EmberlogContext, tag: *const c_char, message: *const c_char) {
    // SAFETY: same contract as emberlog_log
    unsafe { emberlog_log(ctx, EMBERLOG_LEVEL_WARN, tag, message) };
}

/// `emberlog_log` at error level
///
/// # Safety
/// See `emberlog_log`.
#[no_mangle]
pub unsafe extern "C" fn emberlog_error(ctx: *mut EmberlogContext, tag: *const c_char, message: *const c_char) {
    // SAFETY: same contract as emberlog_log
    unsafe { emberlog_log(ctx, EMBERLOG_LEVEL_ERROR, tag, message) };
}

// ============================================================================
// Errors and flushing
// ============================================================================

/// Copy the last recorded error into `buffer`
///
/// Returns -1 for a NULL handle, NULL buffer or zero capacity; 0 when no
/// error is recorded (buffer untouched); otherwise the number of bytes
/// copied, at most `capacity - 1`, followed by a NUL. The error stays
/// recorded after a read.
///
/// # Safety
/// `ctx` must be NULL or a live handle; `buffer` must be NULL or writable
/// for `capacity` bytes.
#[no_mangle]
pub unsafe extern "C" fn emberlog_get_last_error(
    ctx: *mut EmberlogContext,
    buffer: *mut c_char,
    capacity: usize,
) -> c_int {
    // SAFETY: caller guarantees ctx is NULL or live
    let Some(context) = (unsafe { context_ref(ctx) }) else {
        return -1;
    };
    if buffer.is_null() || capacity == 0 {
        return -1;
    }

    guarded(None, -1, || {
        // Keeps the returned length representable as c_int
        let capacity = capacity.min(c_int::MAX as usize);
        // SAFETY: buffer is non-null and caller guarantees capacity writable bytes
        let buf = unsafe { slice::from_raw_parts_mut(buffer.cast::<u8>(), capacity) };
        match context.copy_last_error(buf) {
            Some(n) => c_int::try_from(n).unwrap_or(c_int::MAX),
            None => 0,
        }
    })
}

/// Forget the last recorded error. NULL is a no-op.
///
/// # Safety
/// `ctx` must be NULL or a live handle.
#[no_mangle]
pub unsafe extern "C" fn emberlog_clear_last_error(ctx: *mut EmberlogContext) {
    // SAFETY: caller guarantees ctx is NULL or live
    if let Some(context) = unsafe { context_ref(ctx) } {
        context.clear_last_error();
    }
}

/// Flush the sink
///
/// Returns 0 on success, 1 on failure (recorded as the last error), -1 for
/// a NULL handle.
///
/// # Safety
/// `ctx` must be NULL or a live handle.
#[no_mangle]
pub unsafe extern "C" fn emberlog_flush(ctx: *mut EmberlogContext) -> c_int {
    // SAFETY: caller guarantees ctx is NULL or live
    let Some(context) = (unsafe { context_ref(ctx) }) else {
        return -1;
    };

    guarded(Some(context), 1, || match context.flush() {
        Ok(()) => 0,
        Err(_) => 1,
    })
}
