/*!
 * Tests for language utility functions
 */

use chatrelay::errors::ConfigError;
use chatrelay::language_utils::{find_language, get_language_name, resolve_language_code};

#[test]
fn test_resolveLanguageCode_withIsoCodes_shouldPreferPart1() {
    assert_eq!(resolve_language_code("fr").unwrap(), "fr");
    assert_eq!(resolve_language_code("fra").unwrap(), "fr");
    assert_eq!(resolve_language_code("fre").unwrap(), "fr");
    assert_eq!(resolve_language_code("ger").unwrap(), "de");
    assert_eq!(resolve_language_code(" EN ").unwrap(), "en");
}

#[test]
fn test_resolveLanguageCode_withEnglishName_shouldResolve() {
    assert_eq!(resolve_language_code("French").unwrap(), "fr");
    assert_eq!(resolve_language_code("german").unwrap(), "de");
}

#[test]
fn test_resolveLanguageCode_withInvalidInput_shouldFail() {
    assert!(matches!(resolve_language_code(""), Err(ConfigError::InvalidLanguage(_))));
    assert!(resolve_language_code("zz").is_err());
    assert!(resolve_language_code("e").is_err());
    assert!(resolve_language_code(" E ").is_err());
    assert!(resolve_language_code("123").is_err());
    assert!(resolve_language_code("Klingonese").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert!(find_language("e").is_none());
}
