use std::os::raw::{c_char, c_void};
use std::path::Path;
use std::sync::Once;

use anyhow::{Context, Result, bail};
use whisper_rs::{WhisperContext, WhisperContextParameters};

/// Load a Whisper model and return an initialized `WhisperContext`.
///
/// Why this exists:
/// - We centralize model loading in one place so error handling and defaults stay consistent.
///
/// `use_gpu` requests GPU offload for inference; whisper.cpp falls back to CPU
/// when no usable device is available.
pub fn load_model(model_path: &str, use_gpu: bool) -> Result<WhisperContext> {
    // whisper.cpp logs are very noisy; our binaries want to fully control
    // what gets printed.
    silence_whisper_logs();

    if model_path.trim().is_empty() {
        bail!("model path must be provided");
    }

    let path = Path::new(model_path);
    if !path.exists() {
        bail!("model not found at '{model_path}'");
    }
    if !path.is_file() {
        bail!("model path is not a file: '{model_path}'");
    }

    let mut ctx_params = WhisperContextParameters::default();
    ctx_params.use_gpu(use_gpu);

    let ctx = WhisperContext::new_with_params(model_path, ctx_params)
        .with_context(|| format!("failed to load model from path: {model_path}"))?;

    Ok(ctx)
}

/// A no-op log callback used to silence logs emitted by whisper.cpp.
unsafe extern "C" fn whisper_log_callback(
    _level: u32,
    _c_msg: *const c_char,
    _user_data: *mut c_void,
) {
    // Intentionally left empty.
}

/// Ensure whisper logging is configured exactly once for the lifetime of the process.
fn silence_whisper_logs() {
    static INIT: Once = Once::new();

    INIT.call_once(|| unsafe {
        whisper_rs::set_log_callback(Some(whisper_log_callback), std::ptr::null_mut());
    });
}
