//! Word decoder tests

use rust_morse_decoder::code::{decode, lookup};

#[test]
fn test_decode_empty_and_blank() {
    assert_eq!(decode("").as_str(), "");
    assert_eq!(decode(" ").as_str(), "");
    assert_eq!(decode("    ").as_str(), "");
}

#[test]
fn test_decode_two_letters() {
    assert_eq!(decode(".- -...").as_str(), "AB");
}

#[test]
fn test_decode_unrecognized_run() {
    assert_eq!(decode(".-#").as_str(), "?");
    assert_eq!(decode("......").as_str(), "?");
}

#[test]
fn test_decode_mixed_known_and_unknown() {
    assert_eq!(decode("... ...... ---").as_str(), "S?O");
}

#[test]
fn test_decode_is_pure() {
    let word = ".... . .-.. .-.. ---";
    assert_eq!(decode(word).as_str(), decode(word).as_str());
    assert_eq!(decode(word).as_str(), "HELLO");
}

#[test]
fn test_decode_tolerates_separator_noise() {
    // Leading, trailing and doubled separators all collapse
    assert_eq!(decode(" .-").as_str(), "A");
    assert_eq!(decode(".- ").as_str(), "A");
    assert_eq!(decode(".-  -...").as_str(), "AB");
}

#[test]
fn test_decode_in_progress_letter() {
    // The trailing run decodes even without a closing separator
    assert_eq!(decode("... ---").as_str(), "SO");
    assert_eq!(decode("... --- .").as_str(), "SOE");
}

#[test]
fn test_decode_digits() {
    assert_eq!(decode(".---- ..--- ...--").as_str(), "123");
    assert_eq!(decode("----- ----.").as_str(), "09");
}

#[test]
fn test_decode_full_alphabet() {
    let word = ".- -... -.-. -.. . ..-. --. .... .. .--- -.- .-.. -- -. \
                --- .--. --.- .-. ... - ..- ...- .-- -..- -.-- --..";
    assert_eq!(decode(word).as_str(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
}

#[test]
fn test_translation_never_longer_than_runs() {
    for word in ["", " ", ".", ". .", "...... ......", ".- -... -.-."] {
        let runs = word.split(' ').filter(|r| !r.is_empty()).count();
        assert!(decode(word).len() <= runs, "word {:?}", word);
    }
}

#[test]
fn test_lookup_is_exact() {
    assert_eq!(lookup(".-"), Some('A'));
    assert_eq!(lookup(".- "), None); // separators are not the decoder's job
    assert_eq!(lookup(""), None);
}
