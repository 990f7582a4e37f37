//! Dice-notation strings like "1d6" or "2d8"

/// Checks that a damage string is well-formed dice notation: one or more
/// digits, a literal `d`, one or more digits, nothing else.
pub fn is_dice_notation(s: &str) -> bool {
    let Some((count, sides)) = s.split_once('d') else {
        return false;
    };
    !count.is_empty()
        && !sides.is_empty()
        && count.bytes().all(|b| b.is_ascii_digit())
        && sides.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_dice() {
        assert!(is_dice_notation("1d6"));
        assert!(is_dice_notation("2d8"));
        assert!(is_dice_notation("10d12"));
    }

    #[test]
    fn test_rejects_malformed_dice() {
        assert!(!is_dice_notation("invalid"));
        assert!(!is_dice_notation("d6"));
        assert!(!is_dice_notation("1d"));
        assert!(!is_dice_notation("1d6+2"));
        assert!(!is_dice_notation("1D6"));
        assert!(!is_dice_notation(""));
    }
}
