// Raw-pointer C surface for the mobile host.
// Every entry point goes through catch_unwind so a panic never crosses the
// FFI boundary.
use crate::core::types::GlyphCard;
use crate::recognizer::{DetectionResponse, Transcript};
use crate::TranslatorEngine;
use libc::c_char;
use serde::Serialize;
use std::ffi::{CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::ptr;

static mut ENGINE: *mut TranslatorEngine = ptr::null_mut();
static mut TRANSCRIPT: *mut Transcript = ptr::null_mut();

fn get_cache_path() -> PathBuf {
    let mut path = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .expect("Could not find a valid home/data directory");
    path.push("sign-smart-translator");
    path.push("glyph_dictionary.bin");
    path
}

fn get_manifest_path() -> PathBuf {
    let mut path = get_cache_path();
    path.set_file_name("glyph_manifest.json");
    path
}

/// What `sign_translator_tick` reports back to the host.
#[derive(Serialize)]
struct TickReport {
    playing: bool,
    card: Option<GlyphCard>,
}

fn to_c_string(json: String) -> *mut c_char {
    CString::new(json).unwrap_or_default().into_raw()
}

unsafe fn engine_mut<'a>() -> Option<&'a mut TranslatorEngine> {
    ENGINE.as_mut()
}

unsafe fn engine<'a>() -> Option<&'a TranslatorEngine> {
    ENGINE.as_ref()
}

unsafe fn transcript_mut<'a>() -> Option<&'a mut Transcript> {
    TRANSCRIPT.as_mut()
}

#[no_mangle]
pub extern "C" fn sign_translator_init() {
    let result = catch_unwind(|| unsafe {
        if !ENGINE.is_null() {
            return;
        }
        let cache_path = get_cache_path();
        if let Some(parent) = cache_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let engine = TranslatorEngine::from_manifest_or_cache(
            get_manifest_path().to_str().unwrap_or(""),
            cache_path.to_str().unwrap_or(""),
        );
        ENGINE = Box::into_raw(Box::new(engine));
        TRANSCRIPT = Box::into_raw(Box::new(Transcript::new()));
        eprintln!("[Rust] Sign translator engine initialized successfully.");
    });
    if result.is_err() {
        eprintln!("[Rust FATAL] A panic occurred during translator initialization.");
        unsafe {
            ENGINE = ptr::null_mut();
            TRANSCRIPT = ptr::null_mut();
        }
    }
}

#[no_mangle]
pub extern "C" fn sign_translator_destroy() {
    unsafe {
        if !TRANSCRIPT.is_null() {
            drop(Box::from_raw(TRANSCRIPT));
            TRANSCRIPT = ptr::null_mut();
        }
        if ENGINE.is_null() {
            return;
        }
        let engine = Box::from_raw(ENGINE);
        if let Err(e) = engine.save_dictionary() {
            eprintln!("[Rust ERR] Failed to save glyph cache: {}", e);
        } else {
            eprintln!("[Rust] Glyph cache saved successfully.");
        }
        ENGINE = ptr::null_mut();
    }
}

#[no_mangle]
pub extern "C" fn sign_translator_set_text(text: *const c_char) {
    let c_str = unsafe { CStr::from_ptr(text) };
    let text = c_str.to_str().unwrap_or("");
    let _ = catch_unwind(AssertUnwindSafe(|| unsafe {
        if let Some(engine) = engine_mut() {
            engine.set_text(text);
        }
    }));
}

/// All renderable cards for the gallery view, as a JSON array.
#[no_mangle]
pub extern "C" fn sign_translator_get_gallery() -> *mut c_char {
    let result = catch_unwind(AssertUnwindSafe(|| {
        unsafe {
            if let Some(engine) = engine() {
                return serde_json::to_string(&engine.gallery())
                    .unwrap_or_else(|_| "[]".to_string());
            }
        }
        "[]".to_string()
    }));
    let json = result.unwrap_or_else(|_| {
        eprintln!("[Rust FATAL] Panic in get_gallery.");
        "[]".to_string()
    });
    to_c_string(json)
}

/// Returns true when the toggle left the slideshow playing.
#[no_mangle]
pub extern "C" fn sign_translator_toggle_play() -> bool {
    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        match engine_mut() {
            Some(engine) => {
                engine.toggle_playback();
                engine.is_playing()
            }
            None => false,
        }
    }));
    result.unwrap_or_else(|_| {
        eprintln!("[Rust FATAL] Panic in toggle_play.");
        false
    })
}

/// One timer tick. The host arms a fresh 1s timer while `playing` stays
/// true and tears it down as soon as it reads false.
#[no_mangle]
pub extern "C" fn sign_translator_tick() -> *mut c_char {
    let result = catch_unwind(AssertUnwindSafe(|| {
        unsafe {
            if let Some(engine) = engine_mut() {
                let _ = engine.tick();
                let report = TickReport {
                    playing: engine.is_playing(),
                    card: engine.current_card(),
                };
                return serde_json::to_string(&report)
                    .unwrap_or_else(|_| "{\"playing\":false,\"card\":null}".to_string());
            }
        }
        "{\"playing\":false,\"card\":null}".to_string()
    }));
    let json = result.unwrap_or_else(|_| {
        eprintln!("[Rust FATAL] Panic in tick.");
        "{\"playing\":false,\"card\":null}".to_string()
    });
    to_c_string(json)
}

/// Feeds one classifier response body. Returns the accepted word, or an
/// empty string for repeats, empty responses and malformed JSON.
#[no_mangle]
pub extern "C" fn sign_recognizer_push_response(json: *const c_char) -> *mut c_char {
    let c_str = unsafe { CStr::from_ptr(json) };
    let body = c_str.to_str().unwrap_or("");
    let result = catch_unwind(AssertUnwindSafe(|| {
        let response = match DetectionResponse::from_json(body) {
            Ok(response) => response,
            Err(e) => {
                eprintln!("[Rust ERR] Malformed detection response: {}", e);
                return String::new();
            }
        };
        unsafe {
            if let Some(transcript) = transcript_mut() {
                return transcript
                    .push_response(&response)
                    .unwrap_or("")
                    .to_string();
            }
        }
        String::new()
    }));
    let accepted = result.unwrap_or_else(|_| {
        eprintln!("[Rust FATAL] Panic in push_response.");
        String::new()
    });
    to_c_string(accepted)
}

#[no_mangle]
pub extern "C" fn sign_recognizer_undo_last() {
    let _ = catch_unwind(AssertUnwindSafe(|| unsafe {
        if let Some(transcript) = transcript_mut() {
            transcript.undo_last();
        }
    }));
}

/// The running transcript as JSON: the word list, the joined display
/// string and the most recent word.
#[no_mangle]
pub extern "C" fn sign_recognizer_get_transcript() -> *mut c_char {
    #[derive(Serialize)]
    struct TranscriptReport<'a> {
        words: &'a [String],
        joined: String,
        latest: &'a str,
    }

    let result = catch_unwind(AssertUnwindSafe(|| {
        unsafe {
            if let Some(transcript) = TRANSCRIPT.as_ref() {
                let report = TranscriptReport {
                    words: transcript.words(),
                    joined: transcript.joined(),
                    latest: transcript.latest(),
                };
                return serde_json::to_string(&report).unwrap_or_else(|_| "{}".to_string());
            }
        }
        "{}".to_string()
    }));
    let json = result.unwrap_or_else(|_| {
        eprintln!("[Rust FATAL] Panic in get_transcript.");
        "{}".to_string()
    });
    to_c_string(json)
}

#[no_mangle]
pub extern "C" fn sign_translator_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}
