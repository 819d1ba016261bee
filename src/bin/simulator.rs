use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Print, Stylize};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{self, stdout, Write};
use std::time::Instant;
use translator_core::core::dictionary::GlyphDictionary;
use translator_core::core::engine::TICK_INTERVAL;
use translator_core::core::playback::TickOutcome;
use translator_core::TranslatorEngine;

// Terminal mock-up of the translator screen against the built-in glyph set.
// Typing edits the input, Tab toggles the slideshow, Esc quits.
//
// The 1s playback timer lives here, in the host: while the slideshow runs,
// the event loop polls with the time remaining to the next deadline and one
// tick fires when the deadline passes. The deadline is recomputed on every
// toggle, edit and tick, so at most one timer is pending at any moment.

fn main() -> io::Result<()> {
    let mut engine = TranslatorEngine::new(GlyphDictionary::builtin());
    let mut text = String::new();
    let mut next_tick: Option<Instant> = None;

    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut engine, &mut text, &mut next_tick);

    execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(
    engine: &mut TranslatorEngine,
    text: &mut String,
    next_tick: &mut Option<Instant>,
) -> io::Result<()> {
    loop {
        draw(engine, text)?;

        let event_ready = match *next_tick {
            Some(deadline) => event::poll(deadline.saturating_duration_since(Instant::now()))?,
            None => true, // nothing scheduled, block on input below
        };

        if !event_ready {
            // Deadline passed: exactly one tick, then re-arm or disarm.
            *next_tick = match engine.tick() {
                TickOutcome::Advanced(_) => Some(Instant::now() + TICK_INTERVAL),
                TickOutcome::Finished | TickOutcome::Ignored => None,
            };
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    engine.toggle_playback();
                    *next_tick = engine.tick_interval().map(|d| Instant::now() + d);
                }
                KeyCode::Backspace => {
                    text.pop();
                    engine.set_text(text);
                    reschedule(engine, next_tick);
                }
                KeyCode::Char(c) => {
                    text.push(c);
                    engine.set_text(text);
                    reschedule(engine, next_tick);
                }
                _ => {}
            },
            _ => {}
        }
    }
}

/// A text edit mid-playback drops the pending deadline and starts a fresh
/// full period, the same as re-creating the timer.
fn reschedule(engine: &TranslatorEngine, next_tick: &mut Option<Instant>) {
    if engine.is_playing() {
        *next_tick = Some(Instant::now() + TICK_INTERVAL);
    }
}

fn draw(engine: &TranslatorEngine, text: &str) -> io::Result<()> {
    let mut out = stdout();
    queue!(
        out,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print("Sign Smart Translator - simulator\r\n".bold()),
        Print("Type to translate. [Tab] play/stop, [Esc] quit.\r\n\r\n".dim()),
        Print(format!("Input: [{}]\r\n\r\n", text)),
    )?;

    if text.is_empty() {
        queue!(
            out,
            Print("Enter the word you want to translate\r\n".grey())
        )?;
        return out.flush();
    }

    if engine.is_playing() {
        let cards = engine.renderable();
        match engine.current_card() {
            Some(card) => {
                let position = engine.cursor() % cards.len() + 1;
                queue!(
                    out,
                    Print(format!("Slideshow  ({} of {})\r\n\r\n", position, cards.len())),
                    Print(format!("   {}   \r\n", card.key.clone().bold().reverse())),
                    Print(format!("   {}\r\n", card.asset.clone().dim())),
                )?;
            }
            None => {
                queue!(out, Print("Nothing to play for this input.\r\n".grey()))?;
            }
        }
        queue!(out, Print("\r\nState: playing\r\n".red()))?;
    } else {
        let cards = engine.gallery();
        if cards.is_empty() {
            queue!(out, Print("No glyphs match this input.\r\n".grey()))?;
        } else {
            let strip: Vec<String> = cards.iter().map(|card| format!("[{}]", card.key)).collect();
            queue!(
                out,
                Print(format!("Translation ({} cards)\r\n\r\n", cards.len())),
                Print(format!("{}\r\n", strip.join(" "))),
            )?;
        }
        queue!(out, Print("\r\nState: idle\r\n".dim()))?;
    }
    out.flush()
}
