/*!
 * Tests for formatting code protection and restoration
 */

use chatrelay::formatted_text::{protect, restore, FormattedText, CODE_ALPHABET};

#[test]
fn test_protect_withColorCode_shouldWrapInBracketedToken() {
    let protected = FormattedText::new("Hello §7world").protect();
    assert_eq!(protected, "Hello {§7}world");
    assert!(!protected.contains(" §7w"));
}

#[test]
fn test_restore_withSpacesInsideToken_shouldRecoverOriginal() {
    let original = "Hello §7world";
    let protected = protect(original);

    // Translation services like to pad unknown symbols with whitespace
    let damaged = protected.replace("{§7}", "{ § 7 }");
    assert_eq!(restore(&damaged), original);

    let single_spaces = protected.replace("{§7}", "{ §7 }");
    assert_eq!(restore(&single_spaces), original);
}

#[test]
fn test_roundTrip_withEveryCode_shouldBeIdentity() {
    for code in CODE_ALPHABET.chars() {
        let text = format!("§{}start middle §{}end§r", code, code);
        assert_eq!(restore(&protect(&text)), text, "round trip failed for code {}", code);
    }
}

#[test]
fn test_roundTrip_withRealChatLines_shouldBeIdentity() {
    let lines = [
        "§7Loading Resource Pack...",
        "§r§8[Info] server restarting",
        "§5Party Finder:§r§d Hey Steve, over here!",
        "no codes at all",
        "",
        "§§7 double marker",
        "trailing marker §",
        "unicode ✨ §6gold ünïcødé",
    ];
    for line in lines {
        assert_eq!(restore(&protect(line)), line);
    }
}

#[test]
fn test_protect_shouldNeverReorderCodes() {
    let text = FormattedText::new("§a1 §b2 §l3 §r4");
    let restored = FormattedText::restore(&text.protect());
    assert_eq!(restored.codes().collect::<String>(), "ablr");
}

#[test]
fn test_restore_withBrokenToken_shouldLeaveLiteralText() {
    // A closing brace lost in translation is not recoverable, and not an error
    let restored = restore("Bonjour {§7 monde");
    assert_eq!(restored, "Bonjour {§7 monde");
}

#[test]
fn test_stripFormatting_shouldRemoveOnlyCodes() {
    let text = FormattedText::new("§6§lWelcome§r to {the} game");
    assert_eq!(text.strip_formatting(), "Welcome to {the} game");
    assert!(text.has_codes());
    assert!(!FormattedText::new("plain").has_codes());
}

#[test]
fn test_display_shouldPrintRawText() {
    let text: FormattedText = "§cRed".into();
    assert_eq!(text.to_string(), "§cRed");
    assert_eq!(text.as_str(), "§cRed");
}
