//! Call announcements.
//!
//! Well-known numbers have a traditional calling phrase. Every other number,
//! and anything outside 1-90, is read out as a plain `Number N`.

use std::borrow::Cow;

fn phrase(number: u8) -> Option<&'static str> {
    let text = match number {
        1 => "Kelly's Eye, Number One",
        2 => "One Little Duck, Number Two",
        3 => "Cup of Tea, Number Three",
        4 => "Knock at the Door, Number Four",
        5 => "Man Alive, Number Five",
        6 => "Tom Mix, Number Six",
        7 => "Lucky Seven",
        8 => "Garden Gate, Number Eight",
        9 => "Doctor's Orders, Number Nine",
        10 => "Prime Minister's Den, Number Ten",
        11 => "Legs Eleven",
        12 => "One Dozen, Number Twelve",
        13 => "Unlucky for Some, Thirteen",
        14 => "Valentine's Day, Fourteen",
        15 => "Young and Keen, Fifteen",
        16 => "Sweet Sixteen",
        17 => "Dancing Queen, Seventeen",
        18 => "Coming of Age, Eighteen",
        19 => "Goodbye Teens, Nineteen",
        20 => "One Score, Twenty",
        21 => "Royal Salute, Twenty One",
        22 => "Two Little Ducks, Twenty Two",
        30 => "Dirty Gerdie, Thirty",
        33 => "All the Threes, Thirty Three",
        40 => "Life Begins at Forty",
        44 => "All the Fours, Forty Four",
        50 => "Half Century, Fifty",
        55 => "Snakes Alive, Fifty Five",
        60 => "Three Score, Sixty",
        66 => "Clickety Click, Sixty Six",
        70 => "Three Score and Ten, Seventy",
        77 => "Sunset Strip, Seventy Seven",
        80 => "Eight and Blank, Eighty",
        88 => "Two Fat Ladies, Eighty Eight",
        90 => "Top of the Shop, Ninety",
        _ => return None,
    };
    Some(text)
}

/// Calling phrase for `number`.
pub fn announcement(number: u8) -> Cow<'static, str> {
    match phrase(number) {
        Some(text) => Cow::Borrowed(text),
        None => Cow::Owned(format!("Number {number}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_phrases() {
        assert_eq!(announcement(1), "Kelly's Eye, Number One");
        assert_eq!(announcement(10), "Prime Minister's Den, Number Ten");
        assert_eq!(announcement(30), "Dirty Gerdie, Thirty");
        assert_eq!(announcement(44), "All the Fours, Forty Four");
        assert_eq!(announcement(60), "Three Score, Sixty");
        assert_eq!(announcement(90), "Top of the Shop, Ninety");
    }

    #[test]
    fn plain_numbers_fall_back() {
        assert_eq!(announcement(23), "Number 23");
        assert_eq!(announcement(89), "Number 89");
        assert_eq!(announcement(0), "Number 0");
        assert_eq!(announcement(91), "Number 91");
    }
}
