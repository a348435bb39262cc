//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of what to
//! show.  No game logic is performed; this module only translates frames and
//! menu screens into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use waste_management::compositor::Frame;
use waste_management::entities::{
    Outcome, FLOOR_ROW, HEADER_ROWS, SCREEN_ROWS, SCREEN_WIDTH,
};
use waste_management::records::Records;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HEADER: Color = Color::Yellow;
const C_SEA: Color = Color::White;
const C_FLOOR: Color = Color::DarkCyan;
const C_TITLE: Color = Color::Cyan;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_WIN: Color = Color::Green;
const C_LOSE: Color = Color::Red;

// ── Game frame ────────────────────────────────────────────────────────────────

/// Render one complete frame, clipped to the terminal's `size`.
pub fn render<W: Write>(out: &mut W, frame: &Frame, size: (u16, u16)) -> std::io::Result<()> {
    let cols = (size.0 as usize).min(frame.scene.width());
    let rows = size.1 as usize;

    out.queue(style::SetForegroundColor(C_HEADER))?;
    for (row, line) in frame.header.lines.iter().enumerate().take(rows) {
        out.queue(cursor::MoveTo(0, row as u16))?;
        out.queue(Print(clip(line, cols)))?;
    }

    let scene_rows = frame.scene.rows().min(rows.saturating_sub(HEADER_ROWS));
    for row in 0..scene_rows {
        let color = if row as i32 == FLOOR_ROW { C_FLOOR } else { C_SEA };
        out.queue(cursor::MoveTo(0, (row + HEADER_ROWS) as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(clip(&frame.scene.row_string(row), cols)))?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, size.1.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn clip(line: &str, cols: usize) -> String {
    line.chars().take(cols).collect()
}

// ── Menu screens ──────────────────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (SCREEN_WIDTH as u16 / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Dashed rules top and bottom, bars down both sides.
fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let w = SCREEN_WIDTH as usize;
    let h = SCREEN_ROWS as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print("-".repeat(w)))?;
    out.queue(cursor::MoveTo(0, h - 1))?;
    out.queue(Print("-".repeat(w)))?;
    for row in 1..h - 1 {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("|"))?;
        out.queue(cursor::MoveTo(SCREEN_WIDTH as u16 - 1, row))?;
        out.queue(Print("|"))?;
    }
    Ok(())
}

fn finish<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.flush()
}

/// Asks the players to size the terminal so the full box is visible.
pub fn draw_calibration<W: Write>(out: &mut W, size: (u16, u16)) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(
        "Please adjust your window and zoom in/out to see the following box appropriately:",
    ))?;
    let status = format!(
        "Terminal is {}x{}, the game needs {}x{}",
        size.0, size.1, SCREEN_WIDTH, SCREEN_ROWS
    );
    let color = if size.0 as i32 >= SCREEN_WIDTH && size.1 as i32 >= SCREEN_ROWS {
        C_WIN
    } else {
        C_LOSE
    };
    print_centered(out, SCREEN_ROWS as u16 / 2, &status, color)?;
    finish(out)
}

/// One step of the loading animation; `step` picks how many dots show.
pub fn draw_loading<W: Write>(out: &mut W, step: usize) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out)?;
    let dots = ".".repeat(step % 3 + 1);
    print_centered(out, 23, "><)))o>      ><)))o>", C_TEXT)?;
    print_centered(out, 25, &format!("L O A D I N G {:<3}", dots), C_TITLE)?;
    finish(out)
}

pub fn draw_home<W: Write>(out: &mut W, records: &Records) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out)?;

    let title: &[&str] = &[
        "__        __        _         __  __                                                   _   ",
        "\\ \\      / /_ _ ___| |_ ___  |  \\/  | __ _ _ __   __ _  __ _  ___ _ __ ___   ___ _ __ | |_ ",
        " \\ \\ /\\ / / _` / __| __/ _ \\ | |\\/| |/ _` | '_ \\ / _` |/ _` |/ _ \\ '_ ` _ \\ / _ \\ '_ \\| __|",
        "  \\ V  V / (_| \\__ \\ ||  __/ | |  | | (_| | | | | (_| | (_| |  __/ | | | | |  __/ | | | |_ ",
        "   \\_/\\_/ \\__,_|___/\\__\\___| |_|  |_|\\__,_|_| |_|\\__,_|\\__, |\\___|_| |_| |_|\\___|_| |_|\\__|",
        "                                                       |___/                               ",
    ];
    for (i, line) in title.iter().enumerate() {
        print_centered(out, 12 + i as u16, line, C_TITLE)?;
    }

    print_centered(out, 21, "><)))o>   two fish, one shark, and a lot of trash", C_TEXT)?;
    let bests = format!(
        "P1 BEST: {:02}    P2 BEST: {:02}    ENCYCLOPEDIA LVL {}",
        records.p1_best, records.p2_best, records.encyclopedia_level
    );
    print_centered(out, 24, &bests, C_HEADER)?;
    print_centered(
        out,
        28,
        "ENTER : Start   I : Instructions   Q : Quit   ESC : Give up mid-game",
        C_HINT,
    )?;
    finish(out)
}

pub fn draw_instructions<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let lines: &[(u16, &str)] = &[
        (16, "Evade trash while fleeing from a shark!!"),
        (18, "Player one (top fish) uses WASD to move"),
        (19, "Player two (bottom fish) uses IJKL to move"),
        (21, "If you get hit by trash or the other player, your fish will be in a momentary state of shock:"),
        (23, "><)))@>"),
        (25, "During this time, your fish will be susceptible to getting eaten by your pursuer!"),
        (27, "Throughout your journey, you may pass by endangered species..."),
        (28, "If you happen to find them, information about them will be added to your encyclopedia"),
        (29, "Press ESC during a game to give up; your best scores are still saved"),
        (30, "Press Q to exit:"),
    ];

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 15))?;
    out.queue(Print("-".repeat(SCREEN_WIDTH as usize)))?;
    for (row, text) in lines {
        out.queue(cursor::MoveTo(32, *row))?;
        out.queue(style::SetForegroundColor(C_TEXT))?;
        out.queue(Print(*text))?;
    }
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 31))?;
    out.queue(Print("-".repeat(SCREEN_WIDTH as usize)))?;
    finish(out)
}

// ── Result screen ─────────────────────────────────────────────────────────────

pub fn draw_result<W: Write>(
    out: &mut W,
    outcome: Outcome,
    leveled_up: bool,
    records: &Records,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (title, color) = match outcome {
        Outcome::NoWinner => ("GAME OVER - BOTH EATEN", C_LOSE),
        Outcome::PlayerOne => ("PLAYER ONE WON", C_WIN),
        Outcome::PlayerTwo => ("PLAYER TWO WON", C_WIN),
        Outcome::Both => ("BOTH PLAYERS WON", C_WIN),
    };
    let rule = "═".repeat(26);
    let banner = [
        format!("╔{}╗", rule),
        format!("║{:^26}║", title),
        format!("╚{}╝", rule),
    ];
    for (i, line) in banner.iter().enumerate() {
        print_centered(out, 21 + i as u16, line, color)?;
    }

    let bests = format!(
        "P1 BEST: {:02}    P2 BEST: {:02}",
        records.p1_best, records.p2_best
    );
    print_centered(out, 25, &bests, C_HEADER)?;
    print_centered(out, 28, "Press R to Play Again", C_TEXT)?;
    print_centered(out, 29, "Press Q to Quit", C_TEXT)?;
    if leveled_up {
        print_centered(out, 31, "Check Your Encyclopedia For New Entries", C_TITLE)?;
    }
    finish(out)
}
