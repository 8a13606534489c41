// Only explicit naming counts as a request: a note written in Ukrainian is
// not by itself a request for Ukrainian music.
const UKRAINIAN_KEYWORDS: &[&str] = &[
    "ukrain",
    " ukr",
    "ukr ",
    "ua rap",
    "ua hip",
    "\u{0443}\u{043a}\u{0440}\u{0430}\u{0457}\u{043d}", // україн
    "\u{0443}\u{043a}\u{0440}",                         // укр
];

const AMERICAN_KEYWORDS: &[&str] = &[
    "american",
    "us rap",
    "usa",
    "wu-tang",
    "wu tang",
    "90s hip hop",
    "east coast",
    "west coast",
    "\u{0430}\u{043c}\u{0435}\u{0440}\u{0438}\u{043a}\u{0430}\u{043d}", // американ
    "\u{0448}\u{0442}\u{0430}\u{0442}\u{0438}",                         // штати
    "\u{0441}\u{0448}\u{0430}",                                         // сша
    "\u{0432}\u{0443}-\u{0442}\u{0435}\u{043d}\u{0433}",                // ву-тенг
    "\u{0432}\u{0443} \u{0442}\u{0435}\u{043d}\u{0433}",                // ву тенг
];

fn contains_any(note: &str, keywords: &[&str]) -> bool {
    let note = note.to_lowercase();
    keywords.iter().any(|kw| note.contains(kw))
}

pub fn is_explicit_ukrainian_request(note: &str) -> bool {
    contains_any(note, UKRAINIAN_KEYWORDS)
}

pub fn is_explicit_american_request(note: &str) -> bool {
    contains_any(note, AMERICAN_KEYWORDS)
}
