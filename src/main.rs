mod audio;
mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use road_racer::compute::{check_collision, init_round, tick};
use road_racer::config::Tunables;
use road_racer::constants::{CRASH_PAUSE_MS, TOP_N};
use road_racer::entities::{AudioCue, GameState, InputSnapshot};
use road_racer::score_store::ScoreStore;

use audio::Audio;

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Full-screen prompts ───────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum PromptChoice {
    Confirm,
    Quit,
}

/// Block until the player confirms (Space/Enter) or quits (Q/Esc).
///
/// A disconnected input channel counts as a quit: `recv()` would
/// otherwise return `Err` on every iteration and the wait would spin
/// forever with no way out.
fn await_prompt_choice(rx: &mpsc::Receiver<Event>) -> PromptChoice {
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Char(' ') | KeyCode::Enter => return PromptChoice::Confirm,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return PromptChoice::Quit;
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return PromptChoice::Quit,
        }
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    best_score: Option<u32>,
    silent: bool,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "▌▌  ROAD  RACER  ▐▐";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if let Some(best) = best_score {
        let hs_str = format!("Best Score: {}", best);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(3),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    let start_text = "Press SPACE to Start";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(start_text.chars().count() as u16 / 2),
        cy.saturating_sub(1),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(start_text))?;

    let instructions = "Steer with ← / →, avoid the oncoming cars!";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(instructions.chars().count() as u16 / 2),
        cy + 1,
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(instructions))?;

    if silent {
        let note = "(no audio device — running silent)";
        out.queue(cursor::MoveTo(
            cx.saturating_sub(note.chars().count() as u16 / 2),
            cy + 3,
        ))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(note))?;
    }

    let quit_hint = "Q : Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(quit_hint.chars().count() as u16 / 2),
        cy + 5,
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(quit_hint))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    match await_prompt_choice(rx) {
        PromptChoice::Confirm => Ok(MenuResult::Start),
        PromptChoice::Quit => Ok(MenuResult::Quit),
    }
}

// ── High-score screen ─────────────────────────────────────────────────────────

/// Returns `true` → restart (back to the menu path), `false` → quit.
fn show_high_scores<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    top: &[u32],
    last_score: u32,
) -> std::io::Result<bool> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let top_row = (height / 2).saturating_sub(top.len() as u16 / 2 + 4);

    let title = "HIGH SCORES";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        top_row,
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(style::SetForegroundColor(Color::White))?;
    for (i, score) in top.iter().enumerate() {
        let line = format!("{}. {:>5}", i + 1, score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            top_row + 2 + i as u16,
        ))?;
        out.queue(Print(&line))?;
    }

    let last_line = format!("Your Score: {}", last_score);
    out.queue(cursor::MoveTo(
        cx.saturating_sub(last_line.chars().count() as u16 / 2),
        top_row + 3 + top.len() as u16,
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&last_line))?;

    let hint = "Press SPACE to Restart   Q : Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        top_row + 5 + top.len() as u16,
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(hint))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    Ok(await_prompt_choice(rx) == PromptChoice::Confirm)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum RoundEnd {
    Crashed(u32),
    Quit,
}

/// One round: ticks at 60 Hz until the player crashes or quits.
///
/// Input model: instead of acting on each key event individually, a
/// `key_frame` map records the frame number of the last press/repeat event
/// for every key.  Each frame the left/right snapshot is rebuilt from the
/// keys that are still "fresh" (within `HOLD_WINDOW` frames), so held keys
/// move the car every tick and both directions can be held at once.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    audio: Option<&Audio>,
    store: &ScoreStore,
) -> anyhow::Result<RoundEnd> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let round_start = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            match rx.try_recv() {
                Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code.clone(), frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(RoundEnd::Quit);
                            }
                            KeyCode::Char('c')
                                if modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                return Ok(RoundEnd::Quit);
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code.clone(), frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Ok(_) => {}
                Err(mpsc::TryRecvError::Empty) => break,
                // Input thread gone — no quit key could ever arrive
                Err(mpsc::TryRecvError::Disconnected) => return Ok(RoundEnd::Quit),
            }
        }

        let input = InputSnapshot {
            left: is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame),
            right: is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame),
        };

        let cues = tick(state, &input, round_start.elapsed(), &mut rng);
        if let Some(audio) = audio {
            for cue in cues {
                audio.play(cue);
            }
        }

        if check_collision(&state.player, &state.enemies).is_some() {
            if let Some(audio) = audio {
                audio.play(AudioCue::Crash);
            }
            // A write failure here is fatal: the score would be lost.
            store.append(state.score)?;
            display::render(out, state)?;
            thread::sleep(Duration::from_millis(CRASH_PAUSE_MS));
            return Ok(RoundEnd::Crashed(state.score));
        }

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let tunables = Tunables::load();
    let store = ScoreStore::at_default_path();

    // Audio failure degrades to a silent game; it must never be fatal.
    // Warn before entering the alternate screen so the message survives.
    let audio = match Audio::new() {
        Ok(audio) => Some(audio),
        Err(e) => {
            eprintln!("warning: could not open audio device: {e}");
            eprintln!("the game will run without sound");
            None
        }
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, audio.as_ref(), &store, &tunables);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    audio: Option<&Audio>,
    store: &ScoreStore,
    tunables: &Tunables,
) -> anyhow::Result<()> {
    loop {
        let best = store.read_top(1)?.first().copied();
        match show_menu(out, rx, best, audio.is_none())? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state = init_round(tunables, &mut thread_rng());
                match game_loop(out, &mut state, rx, audio, store)? {
                    RoundEnd::Quit => break,
                    RoundEnd::Crashed(score) => {
                        let top = store.read_top(TOP_N)?;
                        if !show_high_scores(out, rx, &top, score)? {
                            break;
                        }
                        // Otherwise loop back to the menu
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn prompt_quits_when_input_thread_is_gone() {
        let (tx, rx) = mpsc::channel::<Event>();
        drop(tx);
        assert_eq!(await_prompt_choice(&rx), PromptChoice::Quit);
    }

    #[test]
    fn prompt_confirms_on_space_press() {
        let (tx, rx) = mpsc::channel();
        tx.send(Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)))
            .unwrap();
        assert_eq!(await_prompt_choice(&rx), PromptChoice::Confirm);
    }

    #[test]
    fn prompt_quits_on_escape_press() {
        let (tx, rx) = mpsc::channel();
        tx.send(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        assert_eq!(await_prompt_choice(&rx), PromptChoice::Quit);
    }

    #[test]
    fn prompt_ignores_key_release_events() {
        let (tx, rx) = mpsc::channel();
        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        tx.send(Event::Key(release)).unwrap();
        tx.send(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        // The release must be skipped; the following Esc press decides
        assert_eq!(await_prompt_choice(&rx), PromptChoice::Quit);
    }
}
