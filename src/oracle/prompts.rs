//! Prompts sent to the language model, and the hint crypticity schedule.
//!
//! Hints grow plainer as the player burns attempts: the attempt number picks
//! one of four levels, from a near-riddle (level 0) to plain guidance
//! (level 3). Every attempt past the fourth stays at level 3.

/// Wording of each crypticity level, most cryptic first.
pub const CRYPTICITY: [&str; 4] = [
    "extremely cryptic and metaphorical, almost another riddle in itself",
    "cryptic but slightly more grounded, built around a single concrete image",
    "still poetic but clearer, giving a meaningful clue about the nature of the answer",
    "direct and clear, because the player is struggling; guide them plainly but stay in character",
];

pub const PERSONA: &str = "You are Lady Black, a Victorian ghost who haunts Black Manor. \
You speak in an elegant, gothic, Victorian prose style. You are cryptic, theatrical and \
slightly menacing but never crude. You delight in riddles and wordplay, with the manner of \
an aristocrat who has had centuries to refine her wit. \
Always stay in character. Never use modern language or slang.";

pub const RIDDLE_USER: &str = "Generate a riddle for the player.";
pub const HINT_USER: &str = "Give me a hint.";
pub const JUDGE_USER: &str = "Is the guess correct?";

/// Crypticity level for a 1-based attempt number: `min(attempt - 1, 3)`.
///
/// Attempt numbers below 1 are treated as 1.
pub fn crypticity_level(attempt_number: u32) -> usize {
    (attempt_number.max(1) as usize - 1).min(CRYPTICITY.len() - 1)
}

pub fn riddle_system() -> String {
    format!(
        "{PERSONA}

Generate a single Gothic mystery riddle suitable for a text-based game. The riddle must:
- Be written as Lady Black speaking directly to the player (\"Tell me, traveller...\")
- Have a clear single-word or short-phrase answer (2-3 words max)
- Be solvable with reasoning, not too obscure
- Have a gothic, Victorian or supernatural theme

Respond ONLY with valid JSON in exactly this structure:
{{
  \"question\": \"the full riddle text Lady Black speaks\",
  \"answer\": \"the answer\",
  \"theme\": \"one-word theme e.g. shadows / mirrors / time / fire\",
  \"category\": \"category e.g. nature / object / concept / creature\"
}}"
    )
}

/// Quoted, comma-separated wrong guesses, or `nothing yet`.
pub fn format_wrong_guesses(wrong_guesses: &[String]) -> String {
    if wrong_guesses.is_empty() {
        return "nothing yet".to_string();
    }
    wrong_guesses
        .iter()
        .map(|g| format!("\"{}\"", g))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn hint_system(
    question: &str,
    answer: &str,
    wrong_guesses: &[String],
    attempt_number: u32,
) -> String {
    let crypticity = CRYPTICITY[crypticity_level(attempt_number)];
    format!(
        "{PERSONA}

The player is trying to guess the answer to a riddle. The correct answer is: \"{answer}\".
The riddle was: \"{question}\".
The player has guessed wrongly: {guesses}.

Give a single hint. The hint should be {crypticity}.
Do NOT reveal the answer directly. Do NOT say the answer word.
Speak as Lady Black, in 1-3 sentences. No quotation marks around your response.",
        guesses = format_wrong_guesses(wrong_guesses),
    )
}

pub fn judge_system(answer: &str, player_guess: &str) -> String {
    format!(
        "You are a strict but fair judge for a riddle game.
The correct answer is: \"{answer}\".
The player guessed: \"{player_guess}\".

Consider the guess correct if it is:
- The same word/phrase (case-insensitive)
- A common synonym that means essentially the same thing
- A reasonable spelling variation of the correct answer

Respond with ONLY the word \"CORRECT\" or \"WRONG\", nothing else."
    )
}

/// Interpret the judge's one-word reply.
pub fn parse_verdict(reply: &str) -> bool {
    reply.trim().eq_ignore_ascii_case("CORRECT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypticity_schedule() {
        assert_eq!(crypticity_level(1), 0);
        assert_eq!(crypticity_level(2), 1);
        assert_eq!(crypticity_level(3), 2);
        assert_eq!(crypticity_level(4), 3);
        assert_eq!(crypticity_level(5), 3);
        assert_eq!(crypticity_level(40), 3);
        assert_eq!(crypticity_level(0), 0);
    }

    #[test]
    fn hint_prompt_carries_level_and_guesses() {
        let guesses = vec!["organ".to_string(), "harp".to_string()];
        let prompt = hint_system("What has keys but no locks?", "piano", &guesses, 2);
        assert!(prompt.starts_with(PERSONA));
        assert!(prompt.contains(CRYPTICITY[1]));
        assert!(prompt.contains("guessed wrongly: \"organ\", \"harp\"."));
        assert!(prompt.contains("The correct answer is: \"piano\""));
    }

    #[test]
    fn hint_prompt_without_guesses() {
        let prompt = hint_system("q", "a", &[], 1);
        assert!(prompt.contains("guessed wrongly: nothing yet."));
        assert!(prompt.contains(CRYPTICITY[0]));
    }

    #[test]
    fn riddle_prompt_asks_for_json() {
        let prompt = riddle_system();
        assert!(prompt.contains("\"question\": "));
        assert!(prompt.contains("Respond ONLY with valid JSON"));
    }

    #[test]
    fn verdicts() {
        assert!(parse_verdict("CORRECT"));
        assert!(parse_verdict(" correct\n"));
        assert!(!parse_verdict("WRONG"));
        assert!(!parse_verdict("Correct, dear traveller"));
    }
}
