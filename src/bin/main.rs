use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use translator_core::core::playback::TickOutcome;
use translator_core::recognizer::{DetectionResponse, Transcript};
use translator_core::TranslatorEngine;

// Line-protocol bridge for a host process (the mobile shell) that owns the
// real 1s timer. The host sends TICK on its schedule and re-arms only while
// we report the slideshow still playing.

fn get_cache_path() -> PathBuf {
    let mut path = dirs::config_dir().expect("Could not find config directory");
    path.push("sign-smart-translator");
    path.push("glyph_dictionary.bin");
    path
}

fn get_log_path() -> PathBuf {
    let mut path = PathBuf::from("target");
    path.push("sign_translator_rust.log");
    path
}

fn log(message: &str) {
    if let Ok(mut file) = File::options().create(true).append(true).open(get_log_path()) {
        let _ = writeln!(file, "{}", message);
    }
}

fn main() -> io::Result<()> {
    // Clear old log file
    let _ = std::fs::remove_file(get_log_path());
    log("--- Sign Translator Rust Engine Starting ---");

    let cache_path = get_cache_path();
    if let Some(parent) = cache_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log(&format!("Error creating config dir: {}", e));
        }
    }

    let manifest_path = cache_path.with_file_name("glyph_manifest.json");
    let mut engine = TranslatorEngine::from_manifest_or_cache(
        manifest_path.to_str().unwrap_or(""),
        cache_path.to_str().unwrap_or(""),
    );
    let mut transcript = Transcript::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        log(&format!("Rust <- '{:?}'", input));
        let (command, rest) = input.split_once(' ').unwrap_or((input.as_str(), ""));

        match command {
            "SET_TEXT" => {
                engine.set_text(rest);
                send_gallery(&engine, &mut stdout)?;
            }
            "TOGGLE_PLAY" => {
                engine.toggle_playback();
                send_play_state(&engine, &mut stdout)?;
                if engine.is_playing() {
                    send_current_card(&engine, &mut stdout)?;
                }
            }
            "TICK" => match engine.tick() {
                TickOutcome::Advanced(_) => send_current_card(&engine, &mut stdout)?,
                TickOutcome::Finished | TickOutcome::Ignored => {
                    send_play_state(&engine, &mut stdout)?;
                }
            },
            "DETECTION" => {
                match DetectionResponse::from_json(rest) {
                    Ok(response) => {
                        transcript.push_response(&response);
                    }
                    Err(e) => log(&format!("Malformed detection response: {}", e)),
                }
                send_transcript(&transcript, &mut stdout)?;
            }
            "UNDO_WORD" => {
                transcript.undo_last();
                send_transcript(&transcript, &mut stdout)?;
            }
            "EXIT" => {
                log("Rust: Received EXIT, saving glyph cache.");
                if let Err(e) = engine.save_dictionary() {
                    log(&format!("Error saving glyph cache: {}", e));
                }
                break;
            }
            _ => {
                log("Rust: Received unknown command.");
            }
        }
    }
    log("Rust: Shutting down.");
    Ok(())
}

fn send_line(cmd: String, stdout: &mut io::Stdout) -> io::Result<()> {
    log(&format!("Rust -> '{:?}'", cmd));
    writeln!(stdout, "{}", cmd)?;
    stdout.flush()
}

fn send_gallery(engine: &TranslatorEngine, stdout: &mut io::Stdout) -> io::Result<()> {
    let json = serde_json::to_string(&engine.gallery()).unwrap_or_else(|_| "[]".to_string());
    send_line(format!("UPDATE_GALLERY {}", json), stdout)
}

fn send_play_state(engine: &TranslatorEngine, stdout: &mut io::Stdout) -> io::Result<()> {
    let state = if engine.is_playing() { "playing" } else { "idle" };
    send_line(format!("PLAY_STATE {}", state), stdout)
}

fn send_current_card(engine: &TranslatorEngine, stdout: &mut io::Stdout) -> io::Result<()> {
    match engine.current_card() {
        Some(card) => {
            let json = serde_json::to_string(&card).unwrap_or_else(|_| "{}".to_string());
            send_line(format!("SHOW_CARD {}", json), stdout)
        }
        None => send_play_state(engine, stdout),
    }
}

fn send_transcript(transcript: &Transcript, stdout: &mut io::Stdout) -> io::Result<()> {
    send_line(format!("TRANSCRIPT {}", transcript.joined()), stdout)
}
