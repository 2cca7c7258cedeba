use once_cell::sync::Lazy;
use regex::Regex;

use pubsift_core::UNKNOWN_DATE;

static MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t|tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b",
    )
    .unwrap()
});

static DAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([12][0-9]|3[01]|0?[1-9])\b").unwrap());

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

/// Build a `YYYY-MM-DD` date from a year and whatever month/day the text mentions.
///
/// An empty year gives [`UNKNOWN_DATE`]. A missing month or day defaults to `01`.
/// The day is the first standalone 1–31 number in the text, so it may come from
/// an unrelated token such as a volume number.
///
/// Month names only count as whole words: "Novel" is not November and
/// "Summary" is not March.
pub fn guess_iso_date(text: &str, year: &str) -> String {
    if year.is_empty() {
        return UNKNOWN_DATE.to_string();
    }

    let month = MONTH_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| month_number(m.as_str()))
        .unwrap_or(1);

    let day = DAY_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|d| d.as_str().parse::<u32>().ok())
        .unwrap_or(1);

    format!("{}-{:02}-{:02}", year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_and_day() {
        assert_eq!(guess_iso_date("Published March 3, 2021", "2021"), "2021-03-03");
        assert_eq!(guess_iso_date("Proc. 2019, Sept 21", "2019"), "2019-09-21");
        assert_eq!(guess_iso_date("dec 31 2020", "2020"), "2020-12-31");
    }

    #[test]
    fn test_defaults_to_first_of_january() {
        assert_eq!(guess_iso_date("Some Venue, 2019", "2019"), "2019-01-01");
        assert_eq!(guess_iso_date("Workshop, June 2018", "2018"), "2018-06-01");
    }

    #[test]
    fn test_empty_year_is_sentinel() {
        assert_eq!(guess_iso_date("March 3", ""), UNKNOWN_DATE);
    }

    #[test]
    fn test_month_needs_word_boundary() {
        // "Summary" and "Marine" must not read as March
        assert_eq!(guess_iso_date("Summary of Marine data, 2020", "2020"), "2020-01-01");
        assert_eq!(guess_iso_date("A Novel Decoder, 2019", "2019"), "2019-01-01");
    }

    #[test]
    fn test_day_ignores_larger_numbers() {
        assert_eq!(guess_iso_date("Vol. 123, May 2017", "2017"), "2017-05-01");
        assert_eq!(guess_iso_date("pp. 45-52, 2017", "2017"), "2017-01-01");
    }
}
