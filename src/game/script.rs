//! Narration spoken by the manor and by Lady Black.

pub const BOOT_LINES: &[&str] = &[
    "BLACKMANOR OS v1.0  ::  Copyright 1983 Black Manor Systems",
    "Memory check: 64K RAM ...... OK",
    "Loading GOTHICA.SYS ........ OK",
    "Loading SPIRIT.DRV ......... OK",
    "Loading RIDDLE.EXE ......... OK",
    "Checking temporal index .... MIDNIGHT",
    "",
    "WARNING: Paranormal activity detected on all channels.",
    "WARNING: Do not attempt to flee.",
    "",
];

pub const BONG_COUNT: u32 = 12;

pub fn bong_line(strike: u32) -> String {
    format!("  BONG {} of {}...", strike, BONG_COUNT)
}

pub const CHILL_LINE: &str = "  A chill descends upon the drawing room.";
pub const CANDLES_LINE: &str = "  The candles gutter. The mirrors go dark.";

pub const INTRO_LINES: &[&str] = &[
    "  Good evening, traveller.",
    "",
    "  I am Lady Black, mistress of Black Manor,",
    "  and keeper of riddles that the living dare not ponder.",
    "",
    "  You stand at midnight in my drawing room.",
    "  There is no door behind you.",
    "",
    "  Answer my riddle and I shall grant you passage.",
    "  Fail... and the manor keeps you.",
];

pub const PREPARING_LINE: &str = "  Preparing the riddle...";
pub const SILENT_SPIRITS_LINE: &str = "  The spirits are silent tonight. Try again later.";

pub const ATTEMPTS_LABEL: &str = "  Attempts remaining: ";
pub const INCORRECT_LINE: &str = "  Incorrect.";
pub const NARROWS_LINE: &str = "  Lady Black narrows her eyes...";

pub fn error_line(message: &str) -> String {
    format!("  [ ERROR: {} ]", message)
}

pub fn theme_line(theme: &str) -> String {
    format!("  Theme: {}", theme)
}

pub fn win_lines(answer: &str) -> Vec<String> {
    let mut lines: Vec<String> = [
        "  Remarkable.",
        "",
        "  You have answered correctly.",
        "",
    ]
    .iter()
    .map(|l| l.to_string())
    .collect();
    lines.push(format!("  The answer was: {}.", answer));
    lines.extend(
        [
            "",
            "  Lady Black inclines her head. A rare honour.",
            "  She presses something cold into your palm.",
            "  A key. Old iron. The door behind you reappears.",
            "",
            "  \"Until we meet again, traveller.\"",
            "",
            "  She fades. The candles brighten.",
            "  You are alone.",
        ]
        .iter()
        .map(|l| l.to_string()),
    );
    lines
}

pub fn lose_lines(answer: &str) -> Vec<String> {
    let mut lines: Vec<String> = [
        "  Five guesses. Five failures.",
        "",
        "  Lady Black throws back her head and laughs.",
        "  The sound echoes through corridors that lead nowhere.",
        "",
    ]
    .iter()
    .map(|l| l.to_string())
    .collect();
    lines.push(format!("  The answer was: {}.", answer));
    lines.extend(
        [
            "",
            "  A grey light seeps beneath the door. Dawn.",
            "  But dawn comes too late for you.",
            "",
            "  \"You belong to the manor now.\"",
            "",
            "  Her form expands to fill the room.",
            "  The candles go dark.",
        ]
        .iter()
        .map(|l| l.to_string()),
    );
    lines
}

pub const PLAY_AGAIN_LINE: &str = "  Play again? (y / n)";

pub const REMATERIALISE_LINES: &[&str] = &[
    "  The drawing room reshapes itself.",
    "  Lady Black re-materialises from the shadows.",
    "",
    "  \"Another riddle, then.\"",
];

pub const FAREWELL_LINES: &[&str] = &[
    "  You chose to leave.",
    "",
    "  The manor does not permit it.",
    "",
    "  . . .",
    "",
    "  Close the terminal to escape.",
    "  If you can.",
];

/// Whether a restart answer means "play again".
pub fn wants_replay(answer: &str) -> bool {
    answer
        .trim()
        .chars()
        .next()
        .map_or(false, |c| c.eq_ignore_ascii_case(&'y'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_answers() {
        for yes in ["y", "Y", "yes", "YES please", "  yeah"] {
            assert!(wants_replay(yes), "{yes:?}");
        }
        for no in ["", "n", "no", "maybe", "ok"] {
            assert!(!wants_replay(no), "{no:?}");
        }
    }

    #[test]
    fn closing_lines_name_the_answer() {
        assert!(win_lines("piano").contains(&"  The answer was: piano.".to_string()));
        assert!(lose_lines("echo").contains(&"  The answer was: echo.".to_string()));
    }

    #[test]
    fn closing_narration_opens_with_the_verdict() {
        assert_eq!(win_lines("piano")[0], "  Remarkable.");
        assert_eq!(lose_lines("piano")[0], "  Five guesses. Five failures.");
        assert_eq!(REMATERIALISE_LINES[0], "  The drawing room reshapes itself.");
        assert!(INTRO_LINES.contains(&"  Fail... and the manor keeps you."));
    }

    #[test]
    fn bongs_count_to_twelve() {
        assert_eq!(bong_line(1), "  BONG 1 of 12...");
        assert_eq!(bong_line(BONG_COUNT), "  BONG 12 of 12...");
    }
}
