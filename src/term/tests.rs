use std::sync::{Arc, Mutex};

use crate::cell::{CellFlags, Color, Rgb};
use crate::event::{Event, EventListener};
use crate::key_encoding::{Key, Modifiers};
use crate::mouse::{MouseAction, MouseButton, MouseEvent, MouseModifiers};
use crate::settings::{LineFeedRule, Settings};

use super::{Term, TermMode};

/// Listener that records every event for later assertions.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Event>>>);

impl EventListener for Recorder {
    fn send_event(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }
}

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    /// All bytes written back to the peer, concatenated.
    fn replies(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::PtyWrite(bytes) => Some(bytes),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

fn make_term() -> (Term<Recorder>, Recorder) {
    let recorder = Recorder::default();
    let term = Term::new(24, 80, Settings::default(), recorder.clone());
    (term, recorder)
}

fn small_term(lines: usize, cols: usize) -> (Term<Recorder>, Recorder) {
    let recorder = Recorder::default();
    let term = Term::new(lines, cols, Settings::default(), recorder.clone());
    (term, recorder)
}

#[test]
fn plain_text_round_trip() {
    let (mut term, _) = make_term();
    term.advance_str("hello");
    assert_eq!(term.grid().row(0).text(), "hello");
    assert_eq!(term.grid().cursor.col, 5);
}

#[test]
fn plain_text_wraps_at_width() {
    let (mut term, _) = small_term(4, 10);
    term.advance_str("0123456789abc");
    assert_eq!(term.grid().row(0).text(), "0123456789");
    assert_eq!(term.grid().row(1).text(), "abc");
}

#[test]
fn clamping_without_wrap_mode() {
    let (mut term, _) = small_term(4, 10);
    term.advance_str("\x1b[?7l0123456789abc");
    assert_eq!(term.grid().row(0).text(), "012345678c");
    assert_eq!(term.grid().row(1).text(), "");
}

#[test]
fn backspace_overwrite() {
    // Scenario: `AB BS C` leaves "AC" with the caret at column 2.
    let (mut term, _) = small_term(4, 10);
    term.advance_str("AB\x08C");
    assert_eq!(term.grid().row(0).text(), "AC");
    assert_eq!(term.grid().cursor.col, 2);
}

#[test]
fn crlf_moves_to_next_line_start() {
    let (mut term, _) = make_term();
    term.advance_str("ab\r\ncd");
    assert_eq!(term.grid().row(0).text(), "ab");
    assert_eq!(term.grid().row(1).text(), "cd");
}

#[test]
fn lf_only_rule_synthesizes_cr() {
    let recorder = Recorder::default();
    let settings = Settings {
        line_feed_rule: LineFeedRule::LfOnly,
        ..Settings::default()
    };
    let mut term = Term::new(24, 80, settings, recorder.clone());
    term.advance_str("ab\ncd");
    assert_eq!(term.grid().row(1).text(), "cd");
    assert_eq!(term.grid().cursor.col, 2);
}

#[test]
fn cr_only_rule_synthesizes_lf() {
    let recorder = Recorder::default();
    let settings = Settings {
        line_feed_rule: LineFeedRule::CrOnly,
        ..Settings::default()
    };
    let mut term = Term::new(24, 80, settings, recorder.clone());
    term.advance_str("ab\rcd");
    assert_eq!(term.grid().row(0).text(), "ab");
    assert_eq!(term.grid().row(1).text(), "cd");
}

#[test]
fn bell_fires_event() {
    let (mut term, recorder) = make_term();
    term.advance('\x07');
    assert!(recorder.events().contains(&Event::Bell));
}

#[test]
fn sgr_basic_color_and_reset() {
    // Scenario: red R, reset, G.
    let (mut term, _) = make_term();
    term.advance_str("\x1b[31mR\x1b[0mG");
    assert_eq!(term.grid().row(0)[0].fg, Color::Indexed(1));
    assert_eq!(term.grid().row(0)[1].fg, Color::Default);
}

#[test]
fn sgr_truecolor() {
    // Scenario: 24-bit foreground.
    let (mut term, _) = make_term();
    term.advance_str("\x1b[38;2;10;20;30mX");
    assert_eq!(
        term.grid().row(0)[0].fg,
        Color::Spec(Rgb { r: 10, g: 20, b: 30 })
    );
}

#[test]
fn sgr_indexed_256() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[38;5;196mX\x1b[48;5;21mY");
    assert_eq!(term.grid().row(0)[0].fg, Color::Indexed(196));
    assert_eq!(term.grid().row(0)[1].bg, Color::Indexed(21));
}

#[test]
fn sgr_reset_law() {
    // Any `0m` resets regardless of preceding history.
    let (mut term, _) = make_term();
    term.advance_str("\x1b[1;4;5;7;8;31;45m\x1b[0m");
    let template = &term.grid().cursor.template;
    assert_eq!(template.fg, Color::Default);
    assert_eq!(template.bg, Color::Default);
    assert!(template.flags.is_empty());
}

#[test]
fn sgr_decorations_toggle() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[1;4;7m");
    let flags = term.grid().cursor.template.flags;
    assert!(flags.contains(CellFlags::BOLD));
    assert!(flags.contains(CellFlags::UNDERLINE));
    assert!(flags.contains(CellFlags::INVERSE));
    term.advance_str("\x1b[24;27m");
    let flags = term.grid().cursor.template.flags;
    assert!(flags.contains(CellFlags::BOLD));
    assert!(!flags.contains(CellFlags::UNDERLINE));
    assert!(!flags.contains(CellFlags::INVERSE));
}

#[test]
fn sgr_bright_colors() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[91mX");
    assert_eq!(term.grid().row(0)[0].fg, Color::Indexed(9));
    term.advance_str("\x1b[104mY");
    assert_eq!(term.grid().row(0)[1].bg, Color::Indexed(12));
}

#[test]
fn sgr_aborted_extended_color_reprocesses() {
    // `38;1` is not a valid extended selector: 1 re-applies as bold.
    let (mut term, _) = make_term();
    term.advance_str("\x1b[38;1m");
    assert!(term.grid().cursor.template.flags.contains(CellFlags::BOLD));
}

#[test]
fn cursor_position_report() {
    // Scenario: DSR 6 with the caret at row 3, col 7 (1-based).
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b[3;7H\x1b[6n");
    assert_eq!(recorder.replies(), b"\x1b[3;7R");
}

#[test]
fn device_status_ok() {
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b[5n");
    assert_eq!(recorder.replies(), b"\x1b[0n");
}

#[test]
fn device_attributes() {
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b[c");
    assert_eq!(recorder.replies(), b"\x1b[?1;2c");
}

#[test]
fn secondary_device_attributes() {
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b[>c");
    assert_eq!(recorder.replies(), b"\x1b[>82;1;0c");
}

#[test]
fn cup_clamps_to_window() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[999;999H");
    assert_eq!(term.grid().cursor.row, 23);
    assert_eq!(term.grid().cursor.col, 79);
}

#[test]
fn origin_mode_offsets_cup() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[5;10r\x1b[?6h\x1b[1;1H");
    assert_eq!(term.grid().cursor.row, 4);
    assert_eq!(term.grid().cursor.col, 0);
    term.advance_str("\x1b[?6l\x1b[1;1H");
    assert_eq!(term.grid().cursor.row, 0);
}

#[test]
fn mouse_tracking_normal_press() {
    // Scenario: DECSET 1000, left press at (row 5, col 9) with shift.
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b[?1000h");
    let consumed = term.mouse_input(MouseEvent {
        action: MouseAction::ButtonDown,
        button: MouseButton::Left,
        modifiers: MouseModifiers::SHIFT,
        row: 5,
        col: 9,
    });
    assert!(consumed);
    assert_eq!(recorder.replies(), vec![0x1b, b'[', b'M', 0x24, 0x2a, 0x26]);
}

#[test]
fn mouse_ignored_when_tracking_off() {
    let (mut term, recorder) = make_term();
    let consumed = term.mouse_input(MouseEvent {
        action: MouseAction::ButtonDown,
        button: MouseButton::Left,
        modifiers: MouseModifiers::empty(),
        row: 0,
        col: 0,
    });
    assert!(!consumed);
    assert!(recorder.replies().is_empty());
}

#[test]
fn mouse_sgr_protocol_selected_by_dispatcher() {
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b[?1000h\x1b[?1006h");
    term.mouse_input(MouseEvent {
        action: MouseAction::ButtonDown,
        button: MouseButton::Right,
        modifiers: MouseModifiers::empty(),
        row: 2,
        col: 3,
    });
    assert_eq!(recorder.replies(), b"\x1b[<2;4;3M");
}

#[test]
fn osc4_programs_palette() {
    // Scenario: palette index 1 becomes pure red.
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b]4;1;#ff0000\x07");
    let red = Rgb { r: 255, g: 0, b: 0 };
    assert_eq!(term.palette().color(1), red);
    assert!(recorder.events().contains(&Event::PaletteChanged(1, red)));

    // An indexed cell written afterwards resolves to the new value
    // without any cell mutation.
    term.advance_str("\x1b[31mR");
    let cell = &term.grid().row(0)[0];
    assert_eq!(cell.fg, Color::Indexed(1));
    assert_eq!(term.palette().color(1), red);
}

#[test]
fn osc4_accepts_multiple_pairs() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b]4;1;#ff0000;2;rgb:00/ff/00\x07");
    assert_eq!(term.palette().color(1), Rgb { r: 255, g: 0, b: 0 });
    assert_eq!(term.palette().color(2), Rgb { r: 0, g: 255, b: 0 });
}

#[test]
fn osc_title_event() {
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b]0;my title\x07");
    assert_eq!(term.title(), "my title");
    assert!(recorder
        .events()
        .contains(&Event::Title("my title".to_string())));
}

#[test]
fn osc_title_with_st_terminator() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b]2;other\x1b\\");
    assert_eq!(term.title(), "other");
}

#[test]
fn osc_icon_name_ignored() {
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b]1;icon\x07");
    assert!(recorder.events().is_empty());
}

#[test]
fn alternate_buffer_round_trip() {
    // Scenario: 1049 enter, mutate, 1049 leave restores the window and
    // cursor.
    let (mut term, _) = make_term();
    term.advance_str("main line\x1b[2;5H");
    let saved_row = term.grid().cursor.row;
    let saved_col = term.grid().cursor.col;

    term.advance_str("\x1b[?1049h");
    assert!(term.is_application_mode());
    // The alternate buffer starts cleared.
    assert_eq!(term.grid().row(0).text(), "");
    term.advance_str("\x1b[1;1Halt content");

    term.advance_str("\x1b[?1049l");
    assert!(!term.is_application_mode());
    assert_eq!(term.grid().row(0).text(), "main line");
    assert_eq!(term.grid().cursor.row, saved_row);
    assert_eq!(term.grid().cursor.col, saved_col);
}

#[test]
fn alt_buffer_restore_without_snapshot_blanks() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[?1049l");
    // No snapshot exists: nothing to restore, screen stays blank.
    assert_eq!(term.grid().row(0).text(), "");
}

#[test]
fn mode_47_keeps_content_on_entry() {
    let (mut term, _) = make_term();
    term.advance_str("visible\x1b[?47h");
    // 47 snapshots without clearing; the application erases itself.
    assert_eq!(term.grid().row(0).text(), "visible");
    term.advance_str("\x1b[2J\x1b[HA");
    term.advance_str("\x1b[?47l");
    assert_eq!(term.grid().row(0).text(), "visible");
}

#[test]
fn buffer_mode_save_restore() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[?47s");
    term.advance_str("\x1b[?47h");
    assert!(term.is_application_mode());
    term.advance_str("\x1b[?47r");
    assert!(!term.is_application_mode());
}

#[test]
fn decset_1048_saves_cursor_per_buffer() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[4;6H\x1b[?1048h\x1b[1;1H\x1b[?1048l");
    assert_eq!(term.grid().cursor.row, 3);
    assert_eq!(term.grid().cursor.col, 5);
}

#[test]
fn idempotent_wrap_toggle() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[?7h\x1b[?7h");
    assert!(term.mode().contains(TermMode::LINE_WRAP));
    term.advance_str("\x1b[?7l");
    assert!(!term.mode().contains(TermMode::LINE_WRAP));
}

#[test]
fn scrollback_suspended_in_alternate_buffer() {
    let (mut term, _) = small_term(3, 10);
    term.advance_str("\x1b[?1049h");
    term.advance_str("a\r\nb\r\nc\r\nd\r\ne");
    assert!(term.grid().scrollback.is_empty());
    term.advance_str("\x1b[?1049l");
    term.advance_str("x\r\ny\r\nz\r\nw");
    assert!(!term.grid().scrollback.is_empty());
}

#[test]
fn ed2_on_main_buffer_fixes_back_color() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[44m\x1b[2J");
    assert_eq!(term.grid().app_mode_bg(), Some(Color::Indexed(4)));
}

#[test]
fn ed2_in_application_mode_fixes_back_color() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[?1049h\x1b[44m\x1b[2J");
    assert_eq!(term.grid().app_mode_bg(), Some(Color::Indexed(4)));
}

#[test]
fn ed2_with_default_background_keeps_prior_value() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[?1049h\x1b[44m\x1b[2J\x1b[49m\x1b[2J");
    assert_eq!(term.grid().app_mode_bg(), Some(Color::Indexed(4)));
}

#[test]
fn ed0_at_home_aliases_to_full_clear() {
    let (mut term, _) = small_term(3, 10);
    term.advance_str("one\r\ntwo\r\nthree\x1b[1;1H\x1b[0J");
    for r in 0..3 {
        assert!(term.grid().row(r).is_blank());
    }
}

#[test]
fn focus_reporting() {
    let (mut term, recorder) = make_term();
    term.focus_changed(true);
    assert!(recorder.replies().is_empty());

    term.advance_str("\x1b[?1004h");
    term.focus_changed(true);
    term.focus_changed(false);
    assert_eq!(recorder.replies(), b"\x1b[I\x1b[O");
}

#[test]
fn bracketed_paste_envelope() {
    let (mut term, _) = make_term();
    assert!(term.paste_leader().is_empty());
    assert!(term.paste_trailer().is_empty());

    term.advance_str("\x1b[?2004h");
    assert_eq!(term.paste_leader(), b"\x1b[200~");
    assert_eq!(term.paste_trailer(), b"\x1b[201~");

    term.advance_str("\x1b[?2004l");
    assert!(term.paste_leader().is_empty());
}

#[test]
fn local_echo_delegated() {
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b[12h");
    assert!(recorder.events().contains(&Event::LocalEcho(false)));
    term.advance_str("\x1b[12l");
    assert!(recorder.events().contains(&Event::LocalEcho(true)));
}

#[test]
fn insert_mode_set_and_reset() {
    let (mut term, _) = make_term();
    term.advance_str("abc\x1b[4h\x1b[1;1HX");
    assert_eq!(term.grid().row(0).text(), "Xabc");
    term.advance_str("\x1b[4l\x1b[1;1HY");
    assert_eq!(term.grid().row(0).text(), "Yabc");
}

#[test]
fn full_reset_clears_modes_and_grid() {
    let (mut term, _) = make_term();
    term.advance_str("content\x1b[?7l\x1b[5;10r\x1b[31m");
    term.advance_str("\x1bc");
    assert_eq!(term.mode(), TermMode::default());
    assert!(term.grid().row(0).is_blank());
    assert_eq!(term.grid().scroll_top(), 0);
    assert_eq!(term.grid().scroll_bottom(), 23);
    assert_eq!(term.grid().cursor.template.fg, Color::Default);
}

#[test]
fn decstr_full_resets() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[?7l\x1b[!p");
    assert!(term.mode().contains(TermMode::LINE_WRAP));
}

#[test]
fn unknown_sequence_resumes_stream() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[999zA");
    assert_eq!(term.grid().row(0).text(), "A");
}

#[test]
fn dcs_swallowed_without_output() {
    let (mut term, _) = make_term();
    term.advance_str("\x1bPq#0;1;2data\x1b\\after");
    assert_eq!(term.grid().row(0).text(), "after");
}

#[test]
fn window_manipulation_accepted_silently() {
    let (mut term, recorder) = make_term();
    term.advance_str("\x1b[14tA");
    assert!(recorder.replies().is_empty());
    assert_eq!(term.grid().row(0).text(), "A");
}

#[test]
fn cursor_to_bottom_left() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[U");
    assert_eq!(term.grid().cursor.row, 23);
    assert_eq!(term.grid().cursor.col, 0);
}

#[test]
fn esc_f_homes_cursor() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[5;5H\x1bF");
    assert_eq!(term.grid().cursor.row, 0);
    assert_eq!(term.grid().cursor.col, 0);
}

#[test]
fn esc_save_restore_cursor() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[3;4H\x1b7\x1b[10;10H\x1b8");
    assert_eq!(term.grid().cursor.row, 2);
    assert_eq!(term.grid().cursor.col, 3);
}

#[test]
fn esc_index_and_reverse_index() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[5;5H\x1bD");
    assert_eq!(term.grid().cursor.row, 5);
    assert_eq!(term.grid().cursor.col, 4);
    term.advance_str("\x1bM\x1bM");
    assert_eq!(term.grid().cursor.row, 3);
}

#[test]
fn esc_next_line() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[5;5H\x1bE");
    assert_eq!(term.grid().cursor.row, 5);
    assert_eq!(term.grid().cursor.col, 0);
}

#[test]
fn keypad_application_mode_toggles() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b=");
    assert!(term.mode().contains(TermMode::APP_KEYPAD));
    term.advance_str("\x1b>");
    assert!(!term.mode().contains(TermMode::APP_KEYPAD));
}

#[test]
fn encode_key_follows_deccm() {
    let (mut term, _) = make_term();
    assert_eq!(term.encode_key(Key::ArrowUp, Modifiers::empty()), b"\x1b[A");
    term.advance_str("\x1b[?1h");
    assert_eq!(term.encode_key(Key::ArrowUp, Modifiers::empty()), b"\x1bOA");
    assert_eq!(
        term.encode_key(Key::ArrowUp, Modifiers::CONTROL),
        b"\x1b[1;5A"
    );
}

#[test]
fn wide_chars_through_the_pipeline() {
    let (mut term, _) = small_term(4, 10);
    term.advance_str("日本語");
    assert_eq!(term.grid().cursor.col, 6);
    assert_eq!(term.grid().row(0).text(), "日本語");
}

#[test]
fn tab_advances_to_stops() {
    let (mut term, _) = make_term();
    term.advance('\t');
    assert_eq!(term.grid().cursor.col, 8);
    term.advance('\t');
    assert_eq!(term.grid().cursor.col, 16);
}

#[test]
fn tab_clear_all_then_tab_reaches_margin() {
    let (mut term, _) = make_term();
    term.advance_str("\x1b[3g\t");
    assert_eq!(term.grid().cursor.col, 79);
}

#[test]
fn reverse_video_marks_everything_dirty() {
    let (mut term, _) = make_term();
    term.grid_mut().dirty_mut().clear();
    term.advance_str("\x1b[?5h");
    assert!(term.mode().contains(TermMode::REVERSE_VIDEO));
    assert!(term.grid().dirty().any_dirty());
}

#[test]
fn print_observer_sees_characters_not_controls() {
    #[derive(Clone, Default)]
    struct PrintLog(Arc<Mutex<String>>);

    impl EventListener for PrintLog {
        fn on_print(&self, c: char) {
            self.0.lock().unwrap().push(c);
        }
    }

    let log = PrintLog::default();
    let mut term = Term::new(24, 80, Settings::default(), log.clone());
    term.advance_str("ab\r\n\x1b[31mc");
    assert_eq!(*log.0.lock().unwrap(), "abc");
}

#[test]
fn reset_internal_preserves_grid() {
    let (mut term, _) = make_term();
    term.advance_str("keep me\x1b[?7l");
    term.reset_internal();
    assert_eq!(term.grid().row(0).text(), "keep me");
    assert!(term.mode().contains(TermMode::LINE_WRAP));
}
